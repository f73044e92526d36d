use dbkit::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Property not found: {id}")]
    PropertyNotFound { id: i32 },

    #[error("Area must be a finite number >= {min} (got {area})")]
    InvalidArea { area: f64, min: f64 },

    #[error("Address cannot be empty")]
    EmptyAddress,

    #[error("Address too long: {len} characters (max: {max})")]
    AddressTooLong { len: usize, max: usize },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn property_not_found(id: i32) -> Self {
        Self::PropertyNotFound { id }
    }

    pub fn invalid_area(area: f64, min: f64) -> Self {
        Self::InvalidArea { area, min }
    }

    pub fn address_too_long(len: usize, max: usize) -> Self {
        Self::AddressTooLong { len, max }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        Self::database(err.to_string())
    }
}
