//! SQLite database layer
//!
//! Owns the connection pool and migrations. The pool is constructed once
//! at process startup and handed to the estimator and the persistence
//! gateway by reference, never through global state.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseConfig;

/// Shared storage handle
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database and run pending migrations.
    pub async fn new(cfg: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&cfg.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(30))
            // Cascade delete of presupuesto_detalle depends on this
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Current timestamp as seen by the store, used by the health endpoint.
    pub async fn server_time(&self) -> Result<String, sqlx::Error> {
        sqlx::query_scalar("SELECT datetime('now')")
            .fetch_one(&self.pool)
            .await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
