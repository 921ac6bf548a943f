//! # Order State Machine
//!
//! The legal status transition chain, as data.
//!
//! ```text
//! Pending ──► Cooking ──► Cooked ──► PickedUp ──► Delivered
//! ```
//!
//! A transition request is valid only if the requested target is the
//! immediate successor of the order's current stored status. Skipping
//! ahead, moving backward, and re-requesting the current status are all
//! rejected. Driver assignment (the claim) is an orthogonal property,
//! not a state here.

use crate::types::OrderStatus;

/// The full status chain in lifecycle order.
pub const STATUS_CHAIN: &[OrderStatus] = &[
    OrderStatus::Pending,
    OrderStatus::Cooking,
    OrderStatus::Cooked,
    OrderStatus::PickedUp,
    OrderStatus::Delivered,
];

/// Returns the immediate successor of `status`, or `None` for the
/// terminal state.
pub fn successor(status: OrderStatus) -> Option<OrderStatus> {
    STATUS_CHAIN
        .iter()
        .position(|s| *s == status)
        .and_then(|i| STATUS_CHAIN.get(i + 1))
        .copied()
}

/// Whether moving from `current` to `target` follows the chain.
pub fn is_valid_transition(current: OrderStatus, target: OrderStatus) -> bool {
    successor(current) == Some(target)
}

/// Whether `status` is terminal.
pub fn is_terminal(status: OrderStatus) -> bool {
    successor(status).is_none()
}

// =============================================================================
// Unit Tests
// =============================================================================
