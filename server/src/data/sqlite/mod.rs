//! SQLite database service
//!
//! Embedded storage for player records, tuned for a single process:
//! - WAL mode for concurrent reads during writes
//! - In-memory temp storage for fast queries
//! - Periodic WAL checkpointing
//!
//! The schema is created idempotently on every start.

pub mod error;
pub mod filters;
pub mod repositories;
mod repository_impl;
pub mod schema;

pub use error::SqliteError;
pub use sqlx::SqlitePool;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::log::LevelFilter;

use crate::core::config::DatabaseConfig;
use crate::core::constants::{
    SQLITE_BUSY_TIMEOUT_SECS, SQLITE_CACHE_SIZE, SQLITE_CHECKPOINT_INTERVAL_SECS,
    SQLITE_DB_FILENAME, SQLITE_WAL_AUTOCHECKPOINT,
};
use crate::core::storage::{AppStorage, DataSubdir};

/// SQLite database service
///
/// Handles database initialization, connection pooling, and background tasks.
/// Should be created once at server startup and shared across all modules.
pub struct SqliteService {
    pool: SqlitePool,
}

impl SqliteService {
    /// Initialize the database service
    ///
    /// Opens (or creates) the database file, configures connection options
    /// and creates the schema if needed. An explicit `database.path` wins
    /// over the data directory.
    pub async fn init(config: &DatabaseConfig, storage: &AppStorage) -> Result<Self, SqliteError> {
        let db_path = Self::resolve_path(config, storage);

        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(SQLITE_BUSY_TIMEOUT_SECS))
            .pragma("cache_size", SQLITE_CACHE_SIZE)
            .pragma("temp_store", "MEMORY")
            .pragma("wal_autocheckpoint", SQLITE_WAL_AUTOCHECKPOINT)
            .log_statements(LevelFilter::Trace);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        Self::create_schema(&pool).await?;

        tracing::debug!(path = %db_path.display(), "SqliteService initialized");
        Ok(Self { pool })
    }

    /// Database file location for this configuration
    pub fn resolve_path(config: &DatabaseConfig, storage: &AppStorage) -> PathBuf {
        match &config.path {
            Some(path) => path.clone(),
            None => storage.subdir(DataSubdir::Sqlite).join(SQLITE_DB_FILENAME),
        }
    }

    async fn create_schema(pool: &SqlitePool) -> Result<(), SqliteError> {
        sqlx::raw_sql(schema::SCHEMA).execute(pool).await?;
        tracing::debug!("Database schema ready");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// In-memory database with the schema applied (single connection, so
    /// every query sees the same database)
    #[cfg(test)]
    pub async fn in_memory() -> Arc<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        Self::create_schema(&pool).await.unwrap();
        Arc::new(Self { pool })
    }

    /// Round-trip a trivial query to confirm the pool can serve requests
    pub async fn ping(&self) -> Result<(), SqliteError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn checkpoint(&self) -> Result<(), SqliteError> {
        sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
            .execute(&self.pool)
            .await?;
        tracing::debug!("WAL checkpoint completed");
        Ok(())
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("SQLite pool closed");
    }

    pub fn start_checkpoint_task(
        self: &Arc<Self>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let db = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(SQLITE_CHECKPOINT_INTERVAL_SECS));
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::debug!("WAL checkpoint task shutting down");
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        if let Err(e) = db.checkpoint().await {
                            tracing::warn!("WAL checkpoint failed: {}", e);
                        }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_creates_database_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = AppStorage::init_for_test(temp_dir.path().to_path_buf());
        let config = DatabaseConfig {
            path: None,
            max_connections: 2,
        };

        let db = SqliteService::init(&config, &storage).await.unwrap();
        db.checkpoint().await.unwrap();
        db.close().await;

        assert!(
            temp_dir
                .path()
                .join("sqlite")
                .join(SQLITE_DB_FILENAME)
                .exists()
        );
    }

    #[tokio::test]
    async fn test_init_honours_explicit_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = AppStorage::init_for_test(temp_dir.path().join("unused"));
        let db_path = temp_dir.path().join("custom").join("players.db");
        let config = DatabaseConfig {
            path: Some(db_path.clone()),
            max_connections: 1,
        };

        let db = SqliteService::init(&config, &storage).await.unwrap();
        db.close().await;

        assert!(db_path.exists());
        assert!(!temp_dir.path().join("unused").exists());
    }

    #[tokio::test]
    async fn test_reopen_keeps_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = AppStorage::init_for_test(temp_dir.path().to_path_buf());
        let config = DatabaseConfig {
            path: None,
            max_connections: 1,
        };

        let db = SqliteService::init(&config, &storage).await.unwrap();
        sqlx::query(
            "INSERT INTO players (name, title, race, profession, birthday, banned, experience, level, until_next_level) \
             VALUES ('Alvin', 'Keeper', 'ELF', 'DRUID', 0, 0, 0, 0, 100)",
        )
        .execute(db.pool())
        .await
        .unwrap();
        db.close().await;

        let db = SqliteService::init(&config, &storage).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM players")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_checkpoint_task_stops_on_shutdown() {
        let db = SqliteService::in_memory().await;
        let (tx, rx) = watch::channel(false);
        let handle = db.start_checkpoint_task(rx);

        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
