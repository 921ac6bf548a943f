//! # Error Types
//!
//! Domain-specific error types for savor-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  savor-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  savor-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  savor-orders errors (service layer)                                   │
//! │  └── OrderError       - What callers of OrderService see               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → OrderError → Transport  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (order id, status, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use crate::types::OrderStatus;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They should be caught
/// by the service layer and translated to caller-facing results.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The actor's role or ownership does not permit the operation.
    #[error("Permission denied")]
    PermissionDenied,

    /// The requested status is not the valid successor of the current one.
    ///
    /// ## When This Occurs
    /// - Skipping ahead (Pending → Cooked)
    /// - Moving backward (Cooked → Cooking)
    /// - Re-requesting the current status
    /// - Any transition out of Delivered
    #[error("Cannot transition from {current:?} to {requested:?}")]
    InvalidTransition {
        current: OrderStatus,
        requested: OrderStatus,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A collection has no entries where at least one is required.
    #[error("{field} must not be empty")]
    Empty { field: String },

    /// A collection exceeds the allowed size.
    #[error("{field} cannot have more than {max} entries")]
    TooMany { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
