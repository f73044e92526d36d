use dbkit::StorageError;
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: i32 },

    #[error("User with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name too long: {len} characters (max: {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(id: i32) -> Self {
        Self::UserNotFound { id }
    }

    pub fn email_already_exists(email: String) -> Self {
        Self::EmailAlreadyExists { email }
    }

    pub fn invalid_email(email: String) -> Self {
        Self::InvalidEmail { email }
    }

    pub fn empty_name() -> Self {
        Self::EmptyName
    }

    pub fn name_too_long(len: usize, max: usize) -> Self {
        Self::NameTooLong { len, max }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Storage failure with the email involved; a unique violation can only be the email index.
    pub fn from_storage(err: StorageError, email: &str) -> Self {
        match err {
            StorageError::UniqueViolation(_) => Self::email_already_exists(email.to_string()),
            other => Self::database(other.to_string()),
        }
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        Self::database(err.to_string())
    }
}
