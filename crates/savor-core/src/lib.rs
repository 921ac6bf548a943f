//! # savor-core: Pure Business Logic for the Savor Order Engine
//!
//! This crate is the **heart** of the order lifecycle engine. It contains
//! all business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Savor Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  API Transport (GraphQL/HTTP)                   │   │
//! │  │        createOrder, getOrders, editOrderStatus, takeOrder       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  savor-orders (OrderService)                    │   │
//! │  │        Orchestration, transactions, event fan-out               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ savor-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │state_machine│  │  policy  │  │   │
//! │  │   │   Order   │  │ dish_price│  │  successor  │  │ can_view │  │   │
//! │  │   │   Dish    │  │order_total│  │    chain    │  │  targets │  │   │
//! │  │   └───────────┘  └───────────┘  └─────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, Dish, Restaurant, Role, etc.)
//! - [`pricing`] - Price calculator (integer cents, no floating point!)
//! - [`policy`] - Role-scoped visibility and permitted status targets
//! - [`state_machine`] - Legal order status transitions
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Declarative Rules**: Permitted targets and the transition chain are
//!    plain data tables, testable on their own
//!
//! ## Example Usage
//!
//! ```rust
//! use savor_core::state_machine::successor;
//! use savor_core::types::OrderStatus;
//!
//! assert_eq!(successor(OrderStatus::Pending), Some(OrderStatus::Cooking));
//! assert_eq!(successor(OrderStatus::Delivered), None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod policy;
pub mod pricing;
pub mod state_machine;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use savor_core::Order` instead of
// `use savor_core::types::Order`

pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum items allowed in a single order
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable order sizes.
/// Can be made configurable per-restaurant in future versions.
pub const MAX_ORDER_ITEMS: usize = 50;
