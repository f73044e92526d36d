use thiserror::Error;

use crate::domain::error::DomainError;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertiesError {
    #[error("Property not found: {id}")]
    NotFound { id: i32 },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl From<DomainError> for PropertiesError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::PropertyNotFound { id } => Self::NotFound { id },
            DomainError::Database { .. } => Self::Internal,
            other => Self::Validation {
                message: other.to_string(),
            },
        }
    }
}
