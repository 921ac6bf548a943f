//! # Dish Repository
//!
//! Reads over dish reference data. Dishes carry their customization
//! options as a JSON column; rows deserialize into the full
//! [`savor_core::Dish`] so pricing never touches raw JSON.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use savor_core::{Dish, DishOption};

/// Repository for dish database operations.
#[derive(Debug, Clone)]
pub struct DishRepository {
    pool: SqlitePool,
}

/// Raw dish row; `options` holds a JSON array of DishOption.
#[derive(Debug, Clone, sqlx::FromRow)]
struct DishRow {
    id: String,
    restaurant_id: String,
    name: String,
    price_cents: i64,
    options: String,
    created_at: DateTime<Utc>,
}

impl DishRow {
    fn into_dish(self) -> DbResult<Dish> {
        let options: Vec<DishOption> = serde_json::from_str(&self.options)?;
        Ok(Dish {
            id: self.id,
            restaurant_id: self.restaurant_id,
            name: self.name,
            price_cents: self.price_cents,
            options,
            created_at: self.created_at,
        })
    }
}

impl DishRepository {
    /// Creates a new DishRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DishRepository { pool }
    }

    /// Gets a dish by ID, options included.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<Dish>> {
        let row = sqlx::query_as::<_, DishRow>(
            r#"
            SELECT id, restaurant_id, name, price_cents, options, created_at
            FROM dishes
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DishRow::into_dish).transpose()
    }

    /// Gets all dishes on a restaurant's menu.
    pub async fn find_by_restaurant(&self, restaurant_id: &str) -> DbResult<Vec<Dish>> {
        let rows = sqlx::query_as::<_, DishRow>(
            r#"
            SELECT id, restaurant_id, name, price_cents, options, created_at
            FROM dishes
            WHERE restaurant_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DishRow::into_dish).collect()
    }

    /// Inserts a dish row, serializing its options to JSON.
    pub async fn insert(&self, dish: &Dish) -> DbResult<()> {
        debug!(id = %dish.id, name = %dish.name, "Inserting dish");

        let options = serde_json::to_string(&dish.options)?;

        sqlx::query(
            r#"
            INSERT INTO dishes (id, restaurant_id, name, price_cents, options, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&dish.id)
        .bind(&dish.restaurant_id)
        .bind(&dish.name)
        .bind(dish.price_cents)
        .bind(options)
        .bind(dish.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
