//! Storage-level error shared by every repository port.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors surfaced by repository implementations.
///
/// Constraint violations are split out so domain services can map them to
/// their own conflict / not-found errors; everything else is opaque.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StorageError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(anyhow::anyhow!(msg.into()))
    }
}

impl From<DbErr> for StorageError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::UniqueViolation(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::ForeignKeyViolation(msg),
            _ => Self::Other(anyhow::Error::new(err)),
        }
    }
}
