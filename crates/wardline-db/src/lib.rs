//! # Wardline DB
//!
//! Persistence for the Wardline API.
//!
//! All reads and writes go through the [`Store`] trait so handlers never see
//! SQL. [`PgStore`] is the production implementation; with the `test-utils`
//! feature, [`MemoryStore`] provides the same contract in process, including
//! the uniqueness and reference rules that PostgreSQL enforces with indexes
//! and foreign keys. [`saga`] holds the doctor writes that span two tables.
//!
//! # Example
//!
//! ```ignore
//! use wardline_config::DatabaseConfig;
//! use wardline_db::{PgStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! run_migrations(&pool).await?;
//! let store = PgStore::new(pool);
//! ```

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod saga;
pub mod store;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use wardline_config::DatabaseConfig;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::{FailPoint, MemoryStore};
pub use postgres::PgStore;
pub use saga::{DoctorProfile, provision_doctor, remove_doctor, update_doctor_profile};
pub use store::Store;

pub use sqlx::PgPool;

/// Connects a PostgreSQL pool sized from configuration.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let url = config
        .url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await
        .context("Failed to connect to database")?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    info!("Database migrations applied");
    Ok(())
}
