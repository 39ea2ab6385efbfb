//! Gradus persistence layer: sqlx/PostgreSQL models and repositories.
//!
//! Entity structs and DTOs live under [`models`]; zero-sized repository
//! structs with async query methods live under [`repositories`]. Query
//! methods accept any [`sqlx::PgExecutor`], so the same repository call
//! works against the pool for snapshot reads and against an open
//! transaction for the lock-validate-mutate sequence the workflow layer
//! runs per project.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
