//! # Order Authorization Policy
//!
//! Role-scoped visibility and permitted status transitions, expressed as
//! declarative tables rather than scattered conditionals.
//!
//! ## Permitted-Target Table
//! ```text
//! ┌──────────────────┬──────────────────────────────┐
//! │ Role             │ Allowed target statuses      │
//! ├──────────────────┼──────────────────────────────┤
//! │ Customer         │ (none)                       │
//! │ RestaurantOwner  │ Cooking, Cooked              │
//! │ DeliveryDriver   │ PickedUp, Delivered          │
//! └──────────────────┴──────────────────────────────┘
//! ```
//!
//! This table is independent of the order's current status; the state
//! machine separately enforces that the edge from the current status to
//! the target is valid.

use crate::types::{Actor, Order, OrderStatus, Role};

/// Status targets a RestaurantOwner may request.
pub const OWNER_TARGETS: &[OrderStatus] = &[OrderStatus::Cooking, OrderStatus::Cooked];

/// Status targets a DeliveryDriver may request.
pub const DRIVER_TARGETS: &[OrderStatus] = &[OrderStatus::PickedUp, OrderStatus::Delivered];

/// Status targets a Customer may request: none.
pub const CUSTOMER_TARGETS: &[OrderStatus] = &[];

/// Returns the status targets the given role may request.
pub fn allowed_targets(role: Role) -> &'static [OrderStatus] {
    match role {
        Role::Customer => CUSTOMER_TARGETS,
        Role::RestaurantOwner => OWNER_TARGETS,
        Role::DeliveryDriver => DRIVER_TARGETS,
    }
}

/// Whether the actor may view the order.
///
/// Visibility is an identity match per role:
/// - Customer: they placed the order
/// - DeliveryDriver: they are the assigned driver (false while unassigned)
/// - RestaurantOwner: they own the order's restaurant
///
/// `restaurant_owner_id` is the owner of `order.restaurant_id`, resolved
/// by the caller (the order row itself does not carry it).
pub fn can_view(actor: &Actor, order: &Order, restaurant_owner_id: &str) -> bool {
    match actor.role {
        Role::Customer => actor.id == order.customer_id,
        Role::DeliveryDriver => order.driver_id.as_deref() == Some(actor.id.as_str()),
        Role::RestaurantOwner => actor.id == restaurant_owner_id,
    }
}

/// Whether the actor's role permits requesting `target` at all.
///
/// A `true` here does not make the transition legal; the current status
/// must also chain to `target` per [`crate::state_machine`].
pub fn can_request_target(role: Role, target: OrderStatus) -> bool {
    allowed_targets(role).contains(&target)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn order(customer: &str, driver: Option<&str>) -> Order {
        Order {
            id: "order-1".to_string(),
            customer_id: customer.to_string(),
            restaurant_id: "rest-1".to_string(),
            driver_id: driver.map(str::to_string),
            status: OrderStatus::Pending,
            total_cents: 12000,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_customer_sees_only_own_order() {
        let o = order("cust-1", None);
        assert!(can_view(&Actor::new("cust-1", Role::Customer), &o, "owner-1"));
        assert!(!can_view(&Actor::new("cust-2", Role::Customer), &o, "owner-1"));
    }

    #[test]
    fn test_driver_sees_only_assigned_order() {
        let unassigned = order("cust-1", None);
        let assigned = order("cust-1", Some("drv-1"));
        let driver = Actor::new("drv-1", Role::DeliveryDriver);

        assert!(!can_view(&driver, &unassigned, "owner-1"));
        assert!(can_view(&driver, &assigned, "owner-1"));
        assert!(!can_view(
            &Actor::new("drv-2", Role::DeliveryDriver),
            &assigned,
            "owner-1"
        ));
    }

    #[test]
    fn test_owner_sees_own_restaurant_order() {
        let o = order("cust-1", None);
        let owner = Actor::new("owner-1", Role::RestaurantOwner);
        assert!(can_view(&owner, &o, "owner-1"));
        assert!(!can_view(&owner, &o, "owner-2"));
    }

    #[test]
    fn test_customer_has_no_targets() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Cooking,
            OrderStatus::Cooked,
            OrderStatus::PickedUp,
            OrderStatus::Delivered,
        ] {
            assert!(!can_request_target(Role::Customer, status));
        }
    }

    #[test]
    fn test_owner_targets_are_cooking_and_cooked() {
        assert!(can_request_target(Role::RestaurantOwner, OrderStatus::Cooking));
        assert!(can_request_target(Role::RestaurantOwner, OrderStatus::Cooked));
        assert!(!can_request_target(Role::RestaurantOwner, OrderStatus::PickedUp));
        assert!(!can_request_target(Role::RestaurantOwner, OrderStatus::Delivered));
        assert!(!can_request_target(Role::RestaurantOwner, OrderStatus::Pending));
    }

    #[test]
    fn test_driver_targets_are_pickedup_and_delivered() {
        assert!(can_request_target(Role::DeliveryDriver, OrderStatus::PickedUp));
        assert!(can_request_target(Role::DeliveryDriver, OrderStatus::Delivered));
        assert!(!can_request_target(Role::DeliveryDriver, OrderStatus::Cooking));
        assert!(!can_request_target(Role::DeliveryDriver, OrderStatus::Cooked));
    }
}
