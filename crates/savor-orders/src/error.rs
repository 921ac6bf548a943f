//! # Service Error Types
//!
//! The caller-facing error taxonomy for `OrderService`. No error crosses
//! the service boundary as an uncontrolled panic; every operation returns
//! a structured `Result`.

use savor_core::{OrderStatus, ValidationError};
use savor_db::DbError;
use thiserror::Error;

/// Errors returned by `OrderService` operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A referenced restaurant, dish, or order does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The actor's role or ownership does not permit the operation, or
    /// the requested target status is outside the role's allowed set.
    #[error("Permission denied")]
    PermissionDenied,

    /// The requested status is not the valid successor of the order's
    /// current status (as observed at the atomic update).
    #[error("Cannot transition from {current:?} to {requested:?}")]
    InvalidTransition {
        current: OrderStatus,
        requested: OrderStatus,
    },

    /// A driver is already assigned to the order (including losing the
    /// claim race).
    #[error("Order {order_id} already has a driver assigned")]
    AlreadyAssigned { order_id: String },

    /// Malformed input, e.g. an empty item list.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage-layer failure, reported generically; retry policy belongs
    /// to the storage collaborator.
    #[error("Persistence error: {0}")]
    Persistence(#[from] DbError),
}

impl OrderError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        OrderError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result type for service operations.
pub type OrderResult<T> = Result<T, OrderError>;

// =============================================================================
// Unit Tests
// =============================================================================
