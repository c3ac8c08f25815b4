use std::str::FromStr;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::error::AppError;

/// The process-wide store handle.
///
/// A value of this type only exists once `connect` has finished, migrations
/// included, so nothing can reach the store before initialisation. Clones
/// share the same underlying pool.
#[derive(Clone, Debug)]
pub enum DatabasePool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl DatabasePool {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            info!("Initializing PostgreSQL connection...");

            let opts = PgConnectOptions::from_str(database_url)?
                .log_statements(LevelFilter::Debug)
                .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

            let pool = PgPoolOptions::new()
                .max_connections(max_connections)
                .connect_with(opts)
                .await?;

            sqlx::migrate!("./migrations/postgres").run(&pool).await?;

            Ok(DatabasePool::Postgres(pool))
        } else {
            info!("Initializing SQLite connection with WAL Mode...");

            let opts = SqliteConnectOptions::from_str(database_url)?
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(5))
                .log_statements(LevelFilter::Debug)
                .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

            let pool = SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect_with(opts)
                .await?;

            Self::from_sqlite(pool).await
        }
    }

    /// Wraps an already-open SQLite pool, bringing its schema up to date.
    pub async fn from_sqlite(pool: SqlitePool) -> Result<Self, AppError> {
        sqlx::migrate!("./migrations/sqlite").run(&pool).await?;
        Ok(DatabasePool::Sqlite(pool))
    }

    /// Hands out the shared handle. Every call returns the same pool.
    pub fn acquire(&self) -> DatabasePool {
        self.clone()
    }

    pub fn backend(&self) -> &'static str {
        match self {
            DatabasePool::Postgres(_) => "postgres",
            DatabasePool::Sqlite(_) => "sqlite",
        }
    }
}
