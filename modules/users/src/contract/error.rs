use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsersError {
    #[error("User not found: {id}")]
    NotFound { id: i32 },

    #[error("User with email '{email}' already exists")]
    Conflict { email: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl UsersError {
    pub fn not_found(id: i32) -> Self {
        Self::NotFound { id }
    }

    pub fn conflict(email: String) -> Self {
        Self::Conflict { email }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for UsersError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            UserNotFound { id } => Self::not_found(id),
            EmailAlreadyExists { email } => Self::conflict(email),
            e @ (InvalidEmail { .. } | EmptyName | NameTooLong { .. } | Validation { .. }) => {
                Self::validation(e.to_string())
            }
            Database { .. } => Self::internal(),
        }
    }
}
