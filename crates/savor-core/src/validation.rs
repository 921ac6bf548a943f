//! # Validation Module
//!
//! Input validation for order creation requests.
//!
//! Validation runs before any repository access so that malformed input
//! never reaches the database. Foreign-key and uniqueness constraints in
//! SQLite remain the last line of defense.

use crate::error::ValidationError;
use crate::types::OrderItemOption;
use crate::MAX_ORDER_ITEMS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// One requested line item: a dish id plus the customer's selections.
///
/// This is the caller-facing input shape for order creation; it becomes
/// an [`crate::types::OrderItem`] once priced and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRequest {
    pub dish_id: String,
    pub options: Vec<OrderItemOption>,
}

impl OrderItemRequest {
    pub fn new(dish_id: impl Into<String>, options: Vec<OrderItemOption>) -> Self {
        OrderItemRequest {
            dish_id: dish_id.into(),
            options,
        }
    }
}

/// Validates an order creation request.
///
/// ## Rules
/// - At least one item
/// - At most [`MAX_ORDER_ITEMS`] items
/// - Every item names a dish (non-blank id)
pub fn validate_order_request(
    restaurant_id: &str,
    items: &[OrderItemRequest],
) -> ValidationResult<()> {
    if restaurant_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "restaurant_id".to_string(),
        });
    }

    if items.is_empty() {
        return Err(ValidationError::Empty {
            field: "items".to_string(),
        });
    }

    if items.len() > MAX_ORDER_ITEMS {
        return Err(ValidationError::TooMany {
            field: "items".to_string(),
            max: MAX_ORDER_ITEMS,
        });
    }

    for item in items {
        if item.dish_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "dish_id".to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
