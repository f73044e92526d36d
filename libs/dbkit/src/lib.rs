//! Database plumbing for the rental server: one sqlx pool per process, wrapped
//! in the SeaORM connection the entity modules work with.
//!
//! ```rust,no_run
//! # async fn demo() -> dbkit::Result<()> {
//! use dbkit::{ConnectOpts, DbHandle};
//!
//! let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
//! let conn = db.sea();
//! # drop(conn);
//! db.close().await;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "pg")]
mod pg;
pub mod sqlite;
pub mod storage;

pub use storage::StorageError;

use std::time::Duration;

use sea_orm::DatabaseConnection;
use thiserror::Error;
use url::Url;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unsupported database DSN: {0}")]
    UnknownDsn(String),

    #[error("{0} support is not compiled in")]
    FeatureDisabled(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DbEngine {
    Postgres,
    Sqlite,
}

impl DbEngine {
    /// Pick the engine from the DSN scheme.
    pub fn from_dsn(dsn: &str) -> Result<Self> {
        let url = Url::parse(dsn.trim()).map_err(|_| DbError::UnknownDsn(dsn.to_owned()))?;
        match url.scheme() {
            "sqlite" => Ok(Self::Sqlite),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(DbError::UnknownDsn(dsn.to_owned())),
        }
    }
}

/// Pool settings; in-memory SQLite ignores `max_conns`.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    pub max_conns: Option<u32>,
    pub acquire_timeout: Option<Duration>,
    /// File databases only; defaults to 5s.
    pub sqlite_busy_timeout: Option<Duration>,
    pub create_sqlite_dirs: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            acquire_timeout: Some(Duration::from_secs(30)),
            sqlite_busy_timeout: None,
            create_sqlite_dirs: true,
        }
    }
}

/// Owns the pool; hands out cheap SeaORM connection clones.
#[derive(Debug)]
pub struct DbHandle {
    engine: DbEngine,
    sea: DatabaseConnection,
}

impl DbHandle {
    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        let engine = DbEngine::from_dsn(dsn)?;
        tracing::debug!(?engine, "connecting to database");

        let sea = match engine {
            #[cfg(feature = "sqlite")]
            DbEngine::Sqlite => sea_orm::SqlxSqliteConnector::from_sqlx_sqlite_pool(
                sqlite::open_pool(dsn, &opts).await?,
            ),
            #[cfg(feature = "pg")]
            DbEngine::Postgres => {
                sea_orm::SqlxPostgresConnector::from_sqlx_postgres_pool(pg::open_pool(dsn, &opts).await?)
            }
            #[cfg(not(feature = "sqlite"))]
            DbEngine::Sqlite => return Err(DbError::FeatureDisabled("SQLite")),
            #[cfg(not(feature = "pg"))]
            DbEngine::Postgres => return Err(DbError::FeatureDisabled("PostgreSQL")),
        };

        Ok(Self { engine, sea })
    }

    pub fn engine(&self) -> DbEngine {
        self.engine
    }

    pub fn sea(&self) -> DatabaseConnection {
        self.sea.clone()
    }

    /// Close the underlying pool; in-flight queries finish first.
    pub async fn close(self) {
        if let Err(e) = self.sea.close().await {
            tracing::warn!(error = %e, "closing database pool failed");
        }
    }
}
