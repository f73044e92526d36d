use chrono::{DateTime, Utc};
use dbkit::StorageError;
use thiserror::Error;

use crate::contract::model::AppointmentStatus;

/// Entity named by a dangling appointment reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    User,
    Property,
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::User => "User",
            Self::Property => "Property",
        })
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Appointment not found: {id}")]
    AppointmentNotFound { id: i32 },

    #[error("{entity} not found: {id}")]
    ReferenceNotFound { entity: Reference, id: i32 },

    #[error("Cannot change status from '{from}' to '{to}'")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("End date {end} must be after start date {start}")]
    InvalidDateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Appointment {id} was changed concurrently; retry the update")]
    ConcurrentUpdate { id: i32 },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn not_found(id: i32) -> Self {
        Self::AppointmentNotFound { id }
    }

    pub fn user_not_found(id: i32) -> Self {
        Self::ReferenceNotFound {
            entity: Reference::User,
            id,
        }
    }

    pub fn property_not_found(id: i32) -> Self {
        Self::ReferenceNotFound {
            entity: Reference::Property,
            id,
        }
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
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        Self::database(err.to_string())
    }
}

impl From<users::contract::UsersError> for DomainError {
    fn from(err: users::contract::UsersError) -> Self {
        Self::database(format!("users lookup failed: {err}"))
    }
}

impl From<properties::contract::PropertiesError> for DomainError {
    fn from(err: properties::contract::PropertiesError) -> Self {
        Self::database(format!("properties lookup failed: {err}"))
    }
}
