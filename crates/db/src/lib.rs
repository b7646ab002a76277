//! PostgreSQL persistence for the vehicle catalog.

use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::FromRow;

pub mod error;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Number of stored records per catalog table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRow)]
pub struct CatalogCounts {
    pub vehicles: i64,
    pub accessories: i64,
    pub manufacturers: i64,
}

pub async fn catalog_counts(pool: &DbPool) -> Result<CatalogCounts, sqlx::Error> {
    sqlx::query_as::<_, CatalogCounts>(
        "SELECT
            (SELECT COUNT(*) FROM vehicles) AS vehicles,
            (SELECT COUNT(*) FROM accessories) AS accessories,
            (SELECT COUNT(*) FROM manufacturers) AS manufacturers",
    )
    .fetch_one(pool)
    .await
}

/// Apply every pending migration under `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
