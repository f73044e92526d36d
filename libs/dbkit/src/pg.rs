use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::{ConnectOpts, Result};

pub(crate) async fn open_pool(dsn: &str, opts: &ConnectOpts) -> Result<PgPool> {
    let mut pool = PgPoolOptions::new();
    if let Some(n) = opts.max_conns {
        pool = pool.max_connections(n);
    }
    if let Some(t) = opts.acquire_timeout {
        pool = pool.acquire_timeout(t);
    }
    let pool = pool.connect(dsn).await?;
    tracing::info!("PostgreSQL pool ready");
    Ok(pool)
}
