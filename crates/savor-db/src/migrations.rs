//! Embedded SQL migrations for the order engine schema.
//!
//! Migration files live in `migrations/sqlite/` and are compiled into the
//! binary, so deployments never depend on loose `.sql` files being present
//! next to the executable. Schema changes go into a fresh
//! `NNN_description.sql`; files that have shipped are immutable.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies any migrations not yet recorded in `_sqlx_migrations`.
///
/// Idempotent; pending migrations run one at a time, in filename order,
/// each inside its own transaction.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!(embedded = MIGRATOR.migrations.len(), "schema is up to date");
    Ok(())
}

/// Reports `(embedded, applied)` migration counts for health checks.
///
/// Errors when the bookkeeping table cannot be read, which includes
/// pools that never ran migrations.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let embedded = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((embedded, applied as usize))
}

// =============================================================================
// Tests
// =============================================================================
