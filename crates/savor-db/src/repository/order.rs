//! # Order Repository
//!
//! Database operations for orders and order items.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── create_atomically() → Order { status: Pending }                │
//! │         (order row + all item rows in ONE transaction;                 │
//! │          a failed dish lookup earlier leaves zero rows)                │
//! │                                                                         │
//! │  2. STATUS TRANSITIONS                                                 │
//! │     └── update_status_if_current() → Cooking → Cooked → ...            │
//! │         (conditional UPDATE: re-validates the current status           │
//! │          at write time; a stale expectation changes no rows)           │
//! │                                                                         │
//! │  3. DRIVER CLAIM (orthogonal to status)                                │
//! │     └── assign_driver_if_unset() → compare-and-set on driver_id        │
//! │         (two racing drivers: exactly one UPDATE hits a row)            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use savor_core::{Order, OrderItem, OrderItemOption, OrderStatus};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

/// Raw order row.
#[derive(Debug, Clone, sqlx::FromRow)]
struct OrderRow {
    id: String,
    customer_id: String,
    restaurant_id: String,
    driver_id: Option<String>,
    status: OrderStatus,
    total_cents: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            customer_id: row.customer_id,
            restaurant_id: row.restaurant_id,
            driver_id: row.driver_id,
            status: row.status,
            total_cents: row.total_cents,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Raw order item row; `options` holds a JSON array of selections.
#[derive(Debug, Clone, sqlx::FromRow)]
struct OrderItemRow {
    id: String,
    order_id: String,
    dish_id: String,
    options: String,
    created_at: DateTime<Utc>,
}

impl OrderItemRow {
    fn into_item(self) -> DbResult<OrderItem> {
        let options: Vec<OrderItemOption> = serde_json::from_str(&self.options)?;
        Ok(OrderItem {
            id: self.id,
            order_id: self.order_id,
            dish_id: self.dish_id,
            options,
            created_at: self.created_at,
        })
    }
}

const SELECT_ORDER: &str = r#"
    SELECT id, customer_id, restaurant_id, driver_id, status,
           total_cents, created_at, updated_at
    FROM orders
"#;

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Persists an order and all of its items as one atomic unit.
    ///
    /// ## Atomicity
    /// Everything runs inside a single transaction: either the order row
    /// and every item row commit together, or nothing is persisted. No
    /// orphan item rows can remain after a partial failure.
    pub async fn create_atomically(&self, order: &Order, items: &[OrderItem]) -> DbResult<()> {
        debug!(
            order_id = %order.id,
            items = items.len(),
            total = %order.total_cents,
            "Creating order"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_id, restaurant_id, driver_id,
                status, total_cents, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(&order.restaurant_id)
        .bind(&order.driver_id)
        .bind(order.status)
        .bind(order.total_cents)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for item in items {
            let options = serde_json::to_string(&item.options)?;

            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, dish_id, options, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.dish_id)
            .bind(options)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Gets an order by ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Order::from))
    }

    /// Gets all items for an order.
    pub async fn find_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT id, order_id, dish_id, options, created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OrderItemRow::into_item).collect()
    }

    /// Gets orders placed by a customer, optionally filtered to one status.
    pub async fn find_by_customer(
        &self,
        customer_id: &str,
        status: Option<OrderStatus>,
    ) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "{SELECT_ORDER} WHERE customer_id = ?1 AND (?2 IS NULL OR status = ?2) ORDER BY created_at"
        ))
        .bind(customer_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// Gets orders assigned to a driver, optionally filtered to one status.
    pub async fn find_by_driver(
        &self,
        driver_id: &str,
        status: Option<OrderStatus>,
    ) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "{SELECT_ORDER} WHERE driver_id = ?1 AND (?2 IS NULL OR status = ?2) ORDER BY created_at"
        ))
        .bind(driver_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// Gets orders across all restaurants an owner owns, optionally
    /// filtered to one status.
    ///
    /// Single JOIN instead of loading each restaurant's orders separately.
    pub async fn find_by_restaurant_owner(
        &self,
        owner_id: &str,
        status: Option<OrderStatus>,
    ) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT o.id, o.customer_id, o.restaurant_id, o.driver_id, o.status,
                   o.total_cents, o.created_at, o.updated_at
            FROM orders o
            JOIN restaurants r ON r.id = o.restaurant_id
            WHERE r.owner_id = ?1 AND (?2 IS NULL OR o.status = ?2)
            ORDER BY o.created_at
            "#,
        )
        .bind(owner_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// Moves an order to `new_status` only if it still sits at
    /// `expected_current`.
    ///
    /// ## Lost-Update Safety
    /// The current status is re-validated inside the UPDATE itself, not
    /// from the caller's earlier read. Two role-holders racing on the
    /// same order cannot both win: the loser's expectation is stale by
    /// the time its UPDATE runs, so it changes no rows.
    ///
    /// ## Returns
    /// `true` if the row was updated; `false` if the expectation was stale.
    pub async fn update_status_if_current(
        &self,
        order_id: &str,
        expected_current: OrderStatus,
        new_status: OrderStatus,
    ) -> DbResult<bool> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                status = ?3,
                updated_at = ?4
            WHERE id = ?1 AND status = ?2
            "#,
        )
        .bind(order_id)
        .bind(expected_current)
        .bind(new_status)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Assigns a driver only if no driver is currently assigned.
    ///
    /// ## Claim Semantics
    /// A single compare-and-set UPDATE, never a read followed by a write:
    /// two drivers racing to claim the same order must not both succeed.
    /// SQLite's per-row atomicity guarantees at most one UPDATE observes
    /// `driver_id IS NULL`.
    ///
    /// ## Returns
    /// `true` if this call won the claim; `false` if a driver was
    /// already set (including losing the race).
    pub async fn assign_driver_if_unset(&self, order_id: &str, driver_id: &str) -> DbResult<bool> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                driver_id = ?2,
                updated_at = ?3
            WHERE id = ?1 AND driver_id IS NULL
            "#,
        )
        .bind(order_id)
        .bind(driver_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

/// Generates a new order ID.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a new order item ID.
pub fn generate_order_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
