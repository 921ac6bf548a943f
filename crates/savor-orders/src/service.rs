//! # Order Service
//!
//! The orchestrator composing pricing, authorization, the state machine,
//! the repositories, and event fan-out.
//!
//! ## Commit-Then-Publish
//! Every mutation persists first and publishes second. If persistence
//! fails, no publish occurs; if publish fails, the already-committed
//! change stands and the failure is logged by the publisher. Subscribers
//! are never told about a state that is not durably stored.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use savor_core::{
    policy, pricing, state_machine,
    validation::{validate_order_request, OrderItemRequest},
    Actor, Order, OrderItem, OrderStatus, Role,
};
use savor_db::Database;

use crate::error::{OrderError, OrderResult};
use crate::events::{EventPublisher, OrderEvent};

/// The order lifecycle engine.
///
/// Holds the database handle and an injected publisher; cheap to clone
/// and share across request handlers.
#[derive(Clone)]
pub struct OrderService {
    db: Database,
    publisher: Arc<dyn EventPublisher>,
}

impl OrderService {
    /// Creates a new OrderService.
    pub fn new(db: Database, publisher: Arc<dyn EventPublisher>) -> Self {
        OrderService { db, publisher }
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Creates a priced order for `customer` against one restaurant.
    ///
    /// Loads the restaurant and every requested dish, prices each item,
    /// and persists the order with all items as one atomic unit. A dish
    /// lookup failure partway through aborts the whole operation with
    /// zero persisted rows. On success publishes `NewPendingOrder`
    /// targeted at the restaurant's owner.
    pub async fn create_order(
        &self,
        customer: &Actor,
        restaurant_id: &str,
        items: &[OrderItemRequest],
    ) -> OrderResult<Order> {
        debug!(customer_id = %customer.id, restaurant_id, "create_order");

        if customer.role != Role::Customer {
            return Err(OrderError::PermissionDenied);
        }

        validate_order_request(restaurant_id, items)?;

        let restaurant = self
            .db
            .restaurants()
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| OrderError::not_found("Restaurant", restaurant_id))?;

        // Price every item before writing anything.
        let mut item_prices = Vec::with_capacity(items.len());
        for item in items {
            let dish = self
                .db
                .dishes()
                .find_by_id(&item.dish_id)
                .await?
                .ok_or_else(|| OrderError::not_found("Dish", &item.dish_id))?;
            item_prices.push(pricing::dish_price(&dish, &item.options));
        }
        let total_cents = pricing::order_total(&item_prices);

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            customer_id: customer.id.clone(),
            restaurant_id: restaurant.id.clone(),
            driver_id: None,
            status: OrderStatus::Pending,
            total_cents,
            created_at: now,
            updated_at: now,
        };

        let order_items: Vec<OrderItem> = items
            .iter()
            .map(|item| OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order.id.clone(),
                dish_id: item.dish_id.clone(),
                options: item.options.clone(),
                created_at: now,
            })
            .collect();

        self.db
            .orders()
            .create_atomically(&order, &order_items)
            .await?;

        info!(
            order_id = %order.id,
            total = %total_cents,
            items = order_items.len(),
            "Order created"
        );

        self.publisher.publish(OrderEvent::NewPendingOrder {
            order: order.clone(),
            owner_id: restaurant.owner_id,
        });

        Ok(order)
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Returns the orders visible to `actor`, optionally filtered to a
    /// single status.
    ///
    /// Visibility scope per role: Customer sees orders they placed,
    /// DeliveryDriver orders assigned to them, RestaurantOwner orders
    /// across all restaurants they own.
    pub async fn get_orders(
        &self,
        actor: &Actor,
        status: Option<OrderStatus>,
    ) -> OrderResult<Vec<Order>> {
        let orders = match actor.role {
            Role::Customer => self.db.orders().find_by_customer(&actor.id, status).await?,
            Role::DeliveryDriver => self.db.orders().find_by_driver(&actor.id, status).await?,
            Role::RestaurantOwner => {
                self.db
                    .orders()
                    .find_by_restaurant_owner(&actor.id, status)
                    .await?
            }
        };

        Ok(orders)
    }

    /// Returns one order if it exists and `actor` may view it.
    pub async fn get_order(&self, actor: &Actor, order_id: &str) -> OrderResult<Order> {
        let (order, owner_id) = self.load_order_with_owner(order_id).await?;

        if !policy::can_view(actor, &order, &owner_id) {
            return Err(OrderError::PermissionDenied);
        }

        Ok(order)
    }

    // =========================================================================
    // Transition
    // =========================================================================

    /// Moves an order to `target` on behalf of `actor`.
    ///
    /// The actor must be able to view the order, the role must permit
    /// the target, and the target must be the immediate successor of
    /// the current status. The status is re-validated by the conditional
    /// UPDATE itself: a request racing a concurrent transition observes
    /// the post-update status and fails with `InvalidTransition` instead
    /// of silently overwriting.
    ///
    /// On success publishes `OrderUpdate` (and `NewCookedOrder` when the
    /// new status is Cooked), strictly after commit.
    pub async fn edit_order_status(
        &self,
        actor: &Actor,
        order_id: &str,
        target: OrderStatus,
    ) -> OrderResult<Order> {
        debug!(actor_id = %actor.id, order_id, ?target, "edit_order_status");

        let (order, owner_id) = self.load_order_with_owner(order_id).await?;

        if !policy::can_view(actor, &order, &owner_id) {
            return Err(OrderError::PermissionDenied);
        }

        if !policy::can_request_target(actor.role, target) {
            return Err(OrderError::PermissionDenied);
        }

        if !state_machine::is_valid_transition(order.status, target) {
            return Err(OrderError::InvalidTransition {
                current: order.status,
                requested: target,
            });
        }

        let updated = self
            .db
            .orders()
            .update_status_if_current(order_id, order.status, target)
            .await?;

        if !updated {
            // Lost a concurrent transition; report against the status
            // actually stored now, not our stale read.
            let current = self
                .db
                .orders()
                .find_by_id(order_id)
                .await?
                .ok_or_else(|| OrderError::not_found("Order", order_id))?;
            return Err(OrderError::InvalidTransition {
                current: current.status,
                requested: target,
            });
        }

        let order = self.reload_order(order_id).await?;

        info!(order_id = %order.id, status = ?order.status, "Order status updated");

        if target == OrderStatus::Cooked {
            self.publisher.publish(OrderEvent::NewCookedOrder {
                order: order.clone(),
            });
        }
        self.publisher.publish(OrderEvent::OrderUpdate {
            order: order.clone(),
        });

        Ok(order)
    }

    // =========================================================================
    // Claim
    // =========================================================================

    /// Claims an unassigned order for `driver`.
    ///
    /// The assignment is a single compare-and-set update; of two drivers
    /// racing to claim the same order exactly one wins, and the loser
    /// gets `AlreadyAssigned`. On success publishes `OrderUpdate` with
    /// the driver set.
    pub async fn take_order(&self, driver: &Actor, order_id: &str) -> OrderResult<Order> {
        debug!(driver_id = %driver.id, order_id, "take_order");

        if driver.role != Role::DeliveryDriver {
            return Err(OrderError::PermissionDenied);
        }

        let order = self
            .db
            .orders()
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::not_found("Order", order_id))?;

        if order.driver_id.is_some() {
            return Err(OrderError::AlreadyAssigned {
                order_id: order_id.to_string(),
            });
        }

        // The CAS is authoritative; the check above only short-circuits
        // the obvious case.
        let claimed = self
            .db
            .orders()
            .assign_driver_if_unset(order_id, &driver.id)
            .await?;

        if !claimed {
            return Err(OrderError::AlreadyAssigned {
                order_id: order_id.to_string(),
            });
        }

        let order = self.reload_order(order_id).await?;

        info!(order_id = %order.id, driver_id = %driver.id, "Order claimed");

        self.publisher.publish(OrderEvent::OrderUpdate {
            order: order.clone(),
        });

        Ok(order)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Loads an order together with its restaurant's owner id, which
    /// the order row itself does not carry.
    async fn load_order_with_owner(&self, order_id: &str) -> OrderResult<(Order, String)> {
        let order = self
            .db
            .orders()
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::not_found("Order", order_id))?;

        let restaurant = self
            .db
            .restaurants()
            .find_by_id(&order.restaurant_id)
            .await?
            .ok_or_else(|| OrderError::not_found("Restaurant", &order.restaurant_id))?;

        Ok((order, restaurant.owner_id))
    }

    async fn reload_order(&self, order_id: &str) -> OrderResult<Order> {
        self.db
            .orders()
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::not_found("Order", order_id))
    }
}
