//! SQLite-specific helpers.

mod path;
#[cfg(feature = "sqlite")]
mod pool;

pub use path::{absolutize_sqlite_dsn, is_memory_dsn, SqliteTarget};
#[cfg(feature = "sqlite")]
pub(crate) use pool::open_pool;
