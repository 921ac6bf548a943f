//! # Restaurant Repository
//!
//! Reads over restaurant reference data. The catalog service owns
//! restaurant writes; the order engine only needs id/owner lookups,
//! plus inserts for seeding and tests.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use savor_core::Restaurant;

/// Repository for restaurant database operations.
#[derive(Debug, Clone)]
pub struct RestaurantRepository {
    pool: SqlitePool,
}

/// Raw restaurant row.
#[derive(Debug, Clone, sqlx::FromRow)]
struct RestaurantRow {
    id: String,
    owner_id: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<RestaurantRow> for Restaurant {
    fn from(row: RestaurantRow) -> Self {
        Restaurant {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl RestaurantRepository {
    /// Creates a new RestaurantRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RestaurantRepository { pool }
    }

    /// Gets a restaurant by ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<Restaurant>> {
        let row = sqlx::query_as::<_, RestaurantRow>(
            r#"
            SELECT id, owner_id, name, created_at
            FROM restaurants
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Restaurant::from))
    }

    /// Gets all restaurants belonging to an owner.
    pub async fn find_by_owner(&self, owner_id: &str) -> DbResult<Vec<Restaurant>> {
        let rows = sqlx::query_as::<_, RestaurantRow>(
            r#"
            SELECT id, owner_id, name, created_at
            FROM restaurants
            WHERE owner_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Restaurant::from).collect())
    }

    /// Inserts a restaurant row.
    pub async fn insert(&self, restaurant: &Restaurant) -> DbResult<()> {
        debug!(id = %restaurant.id, name = %restaurant.name, "Inserting restaurant");

        sqlx::query(
            r#"
            INSERT INTO restaurants (id, owner_id, name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&restaurant.id)
        .bind(&restaurant.owner_id)
        .bind(&restaurant.name)
        .bind(restaurant.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
