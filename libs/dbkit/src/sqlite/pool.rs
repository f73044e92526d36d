use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

use super::path::{prepare_sqlite_path, SqliteTarget};
use crate::{ConnectOpts, Result};

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool with foreign keys enforced on every connection.
///
/// An in-memory database lives and dies with its connection, so that case is
/// pinned to one connection that is never recycled.
pub(crate) async fn open_pool(dsn: &str, opts: &ConnectOpts) -> Result<SqlitePool> {
    let dsn = prepare_sqlite_path(dsn, opts.create_sqlite_dirs)?;
    let in_memory = SqliteTarget::parse(&dsn)? == SqliteTarget::Memory;

    let mut connect = SqliteConnectOptions::from_str(&dsn)?
        .create_if_missing(true)
        .foreign_keys(true)
        .synchronous(SqliteSynchronous::Normal);

    let mut pool = SqlitePoolOptions::new();
    if in_memory {
        pool = pool
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else {
        connect = connect
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(opts.sqlite_busy_timeout.unwrap_or(DEFAULT_BUSY_TIMEOUT));
        if let Some(n) = opts.max_conns {
            pool = pool.max_connections(n);
        }
    }
    if let Some(t) = opts.acquire_timeout {
        pool = pool.acquire_timeout(t);
    }

    let pool = pool.connect_with(connect).await?;
    tracing::info!(%dsn, in_memory, "SQLite pool ready");
    Ok(pool)
}
