//! Database Module
//!
//! Handles the SQLite connection pool and migrations. The pool is owned by
//! [`DbService`] and injected into the reservation service at construction;
//! there is no ambient process-wide handle.

pub mod repository;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, Transaction};

use crate::config::Config;
use repository::{RepoError, RepoResult};

/// Database service — owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database with WAL mode and run migrations.
    pub async fn new(db_path: &str) -> RepoResult<Self> {
        Self::connect(db_path, 5, 5000).await
    }

    /// Open the database described by a [`Config`].
    pub async fn from_config(config: &Config) -> RepoResult<Self> {
        Self::connect(
            &config.database_path,
            config.max_connections,
            config.busy_timeout_ms,
        )
        .await
    }

    /// Build connection options: WAL, foreign keys, normal sync, busy
    /// timeout applied to every pooled connection.
    pub async fn connect(db_path: &str, max_connections: u32, busy_timeout_ms: u64) -> RepoResult<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_millis(busy_timeout_ms))
            .pragma("foreign_keys", "ON")
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        tracing::info!(
            db_path,
            max_connections,
            busy_timeout_ms,
            "database connection established (SQLite WAL)"
        );

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");

        Ok(Self { pool })
    }

    /// Check out a connection for read-only work.
    pub async fn acquire(&self) -> RepoResult<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Begin a transaction; dropped transactions roll back.
    pub async fn begin(&self) -> RepoResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Map a commit failure into the repository error space.
    pub async fn commit(tx: Transaction<'static, Sqlite>) -> RepoResult<()> {
        tx.commit().await.map_err(RepoError::from)
    }
}
