//! End-to-end tests for the order lifecycle engine against an in-memory
//! SQLite database, with a capturing publisher asserting exact
//! topic/payload pairs.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use savor_core::{
    validation::OrderItemRequest, Actor, Dish, DishChoice, DishOption, OrderItemOption,
    OrderStatus, Restaurant, Role,
};
use savor_db::{Database, DbConfig};
use savor_orders::{EventPublisher, OrderError, OrderEvent, OrderService, Topic};

// =============================================================================
// Test Fixtures
// =============================================================================

/// Publisher that records every event for later assertions.
#[derive(Default)]
struct CapturingPublisher {
    events: Mutex<Vec<OrderEvent>>,
}

impl CapturingPublisher {
    fn events(&self) -> Vec<OrderEvent> {
        self.events.lock().unwrap().clone()
    }

    fn count(&self, topic: Topic) -> usize {
        self.events()
            .iter()
            .filter(|e| e.topic() == topic)
            .count()
    }
}

impl EventPublisher for CapturingPublisher {
    fn publish(&self, event: OrderEvent) {
        self.events.lock().unwrap().push(event);
    }
}

struct TestHarness {
    db: Database,
    service: OrderService,
    publisher: Arc<CapturingPublisher>,
}

async fn harness() -> TestHarness {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let publisher = Arc::new(CapturingPublisher::default());
    let service = OrderService::new(db.clone(), publisher.clone());
    TestHarness {
        db,
        service,
        publisher,
    }
}

/// Seeds one restaurant (owner-1) with two plain dishes priced
/// 5000 and 7000 cents.
async fn seed_menu(db: &Database) {
    let restaurant = Restaurant {
        id: "rest-1".to_string(),
        owner_id: "owner-1".to_string(),
        name: "Stone Pot".to_string(),
        created_at: Utc::now(),
    };
    db.restaurants().insert(&restaurant).await.unwrap();

    for (id, name, price) in [
        ("dish-1", "Bulgogi", 5000_i64),
        ("dish-2", "Japchae", 7000_i64),
    ] {
        let dish = Dish {
            id: id.to_string(),
            restaurant_id: "rest-1".to_string(),
            name: name.to_string(),
            price_cents: price,
            options: vec![],
            created_at: Utc::now(),
        };
        db.dishes().insert(&dish).await.unwrap();
    }
}

fn customer() -> Actor {
    Actor::new("cust-1", Role::Customer)
}

fn owner() -> Actor {
    Actor::new("owner-1", Role::RestaurantOwner)
}

fn driver() -> Actor {
    Actor::new("drv-1", Role::DeliveryDriver)
}

// =============================================================================
// Pricing Through The Service
// =============================================================================

#[tokio::test]
async fn create_order_prices_items_from_dish_options() {
    let h = harness().await;

    let restaurant = Restaurant {
        id: "rest-1".to_string(),
        owner_id: "owner-1".to_string(),
        name: "Stone Pot".to_string(),
        created_at: Utc::now(),
    };
    h.db.restaurants().insert(&restaurant).await.unwrap();

    let dish = Dish {
        id: "dish-1".to_string(),
        restaurant_id: "rest-1".to_string(),
        name: "Bibimbap".to_string(),
        price_cents: 8000,
        options: vec![DishOption {
            name: "Size".to_string(),
            extra_cents: None,
            choices: Some(vec![
                DishChoice {
                    name: "Regular".to_string(),
                    extra_cents: Some(0),
                },
                DishChoice {
                    name: "Large".to_string(),
                    extra_cents: Some(1000),
                },
            ]),
        }],
        created_at: Utc::now(),
    };
    h.db.dishes().insert(&dish).await.unwrap();

    // Two large bibimbap: (8000 + 1000) * 2
    let items = vec![
        OrderItemRequest::new("dish-1", vec![OrderItemOption::with_choice("Size", "Large")]),
        OrderItemRequest::new("dish-1", vec![OrderItemOption::with_choice("Size", "Large")]),
    ];
    let order = h
        .service
        .create_order(&customer(), "rest-1", &items)
        .await
        .unwrap();

    assert_eq!(order.total_cents, 18000);
}

#[tokio::test]
async fn create_order_rejects_empty_item_list() {
    let h = harness().await;
    seed_menu(&h.db).await;

    let err = h
        .service
        .create_order(&customer(), "rest-1", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)));
    assert!(h.publisher.events().is_empty());
}

#[tokio::test]
async fn create_order_rejects_unknown_restaurant() {
    let h = harness().await;
    seed_menu(&h.db).await;

    let items = vec![OrderItemRequest::new("dish-1", vec![])];
    let err = h
        .service
        .create_order(&customer(), "rest-nope", &items)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound { entity: "Restaurant", .. }));
}

// =============================================================================
// Creation Atomicity
// =============================================================================

#[tokio::test]
async fn failed_dish_lookup_leaves_zero_rows() {
    let h = harness().await;
    seed_menu(&h.db).await;

    // Second of three dishes does not exist.
    let items = vec![
        OrderItemRequest::new("dish-1", vec![]),
        OrderItemRequest::new("dish-missing", vec![]),
        OrderItemRequest::new("dish-2", vec![]),
    ];
    let err = h
        .service
        .create_order(&customer(), "rest-1", &items)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound { entity: "Dish", .. }));

    // No order is attributable to the attempt, and no item rows
    // reference the first dish.
    let orders = h.service.get_orders(&customer(), None).await.unwrap();
    assert!(orders.is_empty());

    let item_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(h.db.pool())
        .await
        .unwrap();
    assert_eq!(item_rows, 0);

    assert!(h.publisher.events().is_empty());
}

// =============================================================================
// Visibility
// =============================================================================

#[tokio::test]
async fn visibility_is_scoped_per_role() {
    let h = harness().await;
    seed_menu(&h.db).await;

    let items = vec![OrderItemRequest::new("dish-1", vec![])];
    let order = h
        .service
        .create_order(&customer(), "rest-1", &items)
        .await
        .unwrap();

    // Another customer cannot view
    let err = h
        .service
        .get_order(&Actor::new("cust-2", Role::Customer), &order.id)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::PermissionDenied));

    // An owner of a different restaurant cannot view
    let err = h
        .service
        .get_order(&Actor::new("owner-2", Role::RestaurantOwner), &order.id)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::PermissionDenied));

    // An unassigned driver cannot view
    let err = h.service.get_order(&driver(), &order.id).await.unwrap_err();
    assert!(matches!(err, OrderError::PermissionDenied));

    // The rightful parties can
    assert!(h.service.get_order(&customer(), &order.id).await.is_ok());
    assert!(h.service.get_order(&owner(), &order.id).await.is_ok());
}

#[tokio::test]
async fn get_order_distinguishes_absent_from_forbidden() {
    let h = harness().await;
    seed_menu(&h.db).await;

    let err = h
        .service
        .get_order(&customer(), "no-such-order")
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound { entity: "Order", .. }));
}

#[tokio::test]
async fn listings_respect_scope_and_status_filter() {
    let h = harness().await;
    seed_menu(&h.db).await;

    let items = vec![OrderItemRequest::new("dish-1", vec![])];
    h.service
        .create_order(&customer(), "rest-1", &items)
        .await
        .unwrap();
    h.service
        .create_order(&Actor::new("cust-2", Role::Customer), "rest-1", &items)
        .await
        .unwrap();

    // Each customer sees only their own order
    let mine = h.service.get_orders(&customer(), None).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].customer_id, "cust-1");

    // The owner sees both orders against their restaurant
    let owners = h.service.get_orders(&owner(), None).await.unwrap();
    assert_eq!(owners.len(), 2);

    // Status filter narrows
    let cooked = h
        .service
        .get_orders(&owner(), Some(OrderStatus::Cooked))
        .await
        .unwrap();
    assert!(cooked.is_empty());

    // A driver with no assignments sees nothing
    let drivers = h.service.get_orders(&driver(), None).await.unwrap();
    assert!(drivers.is_empty());
}

// =============================================================================
// Transitions
// =============================================================================

#[tokio::test]
async fn customer_may_not_transition_at_all() {
    let h = harness().await;
    seed_menu(&h.db).await;

    let items = vec![OrderItemRequest::new("dish-1", vec![])];
    let order = h
        .service
        .create_order(&customer(), "rest-1", &items)
        .await
        .unwrap();

    let err = h
        .service
        .edit_order_status(&customer(), &order.id, OrderStatus::Cooking)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::PermissionDenied));

    let stored = h.service.get_order(&customer(), &order.id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
}

#[tokio::test]
async fn owner_may_not_request_driver_targets() {
    let h = harness().await;
    seed_menu(&h.db).await;

    let items = vec![OrderItemRequest::new("dish-1", vec![])];
    let order = h
        .service
        .create_order(&customer(), "rest-1", &items)
        .await
        .unwrap();

    let err = h
        .service
        .edit_order_status(&owner(), &order.id, OrderStatus::PickedUp)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::PermissionDenied));
}

#[tokio::test]
async fn skipping_ahead_is_invalid_even_for_allowed_targets() {
    let h = harness().await;
    seed_menu(&h.db).await;

    let items = vec![OrderItemRequest::new("dish-1", vec![])];
    let order = h
        .service
        .create_order(&customer(), "rest-1", &items)
        .await
        .unwrap();

    // Cooked is in the owner's allowed set, but Pending → Cooked skips
    // the Cooking state.
    let err = h
        .service
        .edit_order_status(&owner(), &order.id, OrderStatus::Cooked)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::InvalidTransition {
            current: OrderStatus::Pending,
            requested: OrderStatus::Cooked,
        }
    ));

    // Stored status unchanged
    let stored = h.service.get_order(&owner(), &order.id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
}

#[tokio::test]
async fn stale_transition_loses_against_stored_status() {
    let h = harness().await;
    seed_menu(&h.db).await;

    let items = vec![OrderItemRequest::new("dish-1", vec![])];
    let order = h
        .service
        .create_order(&customer(), "rest-1", &items)
        .await
        .unwrap();

    // Move Pending → Cooking behind the service's back, simulating a
    // concurrent winner between this request's read and its write.
    let moved = h
        .db
        .orders()
        .update_status_if_current(&order.id, OrderStatus::Pending, OrderStatus::Cooking)
        .await
        .unwrap();
    assert!(moved);

    // The repeat Pending → Cooking request reports the status actually
    // stored now.
    let err = h
        .service
        .edit_order_status(&owner(), &order.id, OrderStatus::Cooking)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::InvalidTransition {
            current: OrderStatus::Cooking,
            requested: OrderStatus::Cooking,
        }
    ));
}

// =============================================================================
// Claims
// =============================================================================

#[tokio::test]
async fn concurrent_claims_yield_exactly_one_winner() {
    let h = harness().await;
    seed_menu(&h.db).await;

    let items = vec![OrderItemRequest::new("dish-1", vec![])];
    let order = h
        .service
        .create_order(&customer(), "rest-1", &items)
        .await
        .unwrap();

    let drv_a = Actor::new("drv-a", Role::DeliveryDriver);
    let drv_b = Actor::new("drv-b", Role::DeliveryDriver);

    let (res_a, res_b) = tokio::join!(
        h.service.take_order(&drv_a, &order.id),
        h.service.take_order(&drv_b, &order.id),
    );

    let winners = [&res_a, &res_b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);

    let (winner_id, loser) = if res_a.is_ok() {
        ("drv-a", res_b)
    } else {
        ("drv-b", res_a)
    };
    assert!(matches!(
        loser.unwrap_err(),
        OrderError::AlreadyAssigned { .. }
    ));

    // The stored driver is the successful caller, never anyone else.
    let stored = h.db.orders().find_by_id(&order.id).await.unwrap().unwrap();
    assert_eq!(stored.driver_id.as_deref(), Some(winner_id));
}

#[tokio::test]
async fn non_drivers_cannot_claim() {
    let h = harness().await;
    seed_menu(&h.db).await;

    let items = vec![OrderItemRequest::new("dish-1", vec![])];
    let order = h
        .service
        .create_order(&customer(), "rest-1", &items)
        .await
        .unwrap();

    let err = h.service.take_order(&owner(), &order.id).await.unwrap_err();
    assert!(matches!(err, OrderError::PermissionDenied));
}

// =============================================================================
// End To End
// =============================================================================

#[tokio::test]
async fn full_lifecycle_with_event_fanout() {
    let h = harness().await;
    seed_menu(&h.db).await;

    // Customer orders two plain dishes priced 5000 and 7000.
    let items = vec![
        OrderItemRequest::new("dish-1", vec![]),
        OrderItemRequest::new("dish-2", vec![]),
    ];
    let order = h
        .service
        .create_order(&customer(), "rest-1", &items)
        .await
        .unwrap();

    assert_eq!(order.total_cents, 12000);
    assert_eq!(order.status, OrderStatus::Pending);

    // NewPendingOrder published once, targeted at the restaurant owner.
    assert_eq!(h.publisher.count(Topic::NewPendingOrder), 1);
    match &h.publisher.events()[0] {
        OrderEvent::NewPendingOrder { order: o, owner_id } => {
            assert_eq!(o.id, order.id);
            assert_eq!(owner_id, "owner-1");
        }
        other => panic!("unexpected first event: {other:?}"),
    }

    // Owner cooks.
    h.service
        .edit_order_status(&owner(), &order.id, OrderStatus::Cooking)
        .await
        .unwrap();
    assert_eq!(h.publisher.count(Topic::NewCookedOrder), 0);

    h.service
        .edit_order_status(&owner(), &order.id, OrderStatus::Cooked)
        .await
        .unwrap();
    assert_eq!(h.publisher.count(Topic::NewCookedOrder), 1);

    // Driver claims; the update payload carries the driver.
    let claimed = h.service.take_order(&driver(), &order.id).await.unwrap();
    assert_eq!(claimed.driver_id.as_deref(), Some("drv-1"));
    let last = h.publisher.events().last().unwrap().clone();
    match last {
        OrderEvent::OrderUpdate { order: o } => {
            assert_eq!(o.driver_id.as_deref(), Some("drv-1"));
        }
        other => panic!("unexpected event after claim: {other:?}"),
    }

    // Driver transports.
    h.service
        .edit_order_status(&driver(), &order.id, OrderStatus::PickedUp)
        .await
        .unwrap();
    let delivered = h
        .service
        .edit_order_status(&driver(), &order.id, OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);

    // A second claim attempt after the first succeeded.
    let err = h
        .service
        .take_order(&Actor::new("drv-2", Role::DeliveryDriver), &order.id)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::AlreadyAssigned { .. }));

    // One OrderUpdate per committed change: claim + 4 transitions.
    assert_eq!(h.publisher.count(Topic::OrderUpdate), 5);
    assert_eq!(h.publisher.count(Topic::NewPendingOrder), 1);
    assert_eq!(h.publisher.count(Topic::NewCookedOrder), 1);
}
