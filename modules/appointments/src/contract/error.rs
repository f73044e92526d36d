use thiserror::Error;

use crate::domain::error::DomainError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppointmentsError {
    #[error("Appointment not found: {id}")]
    NotFound { id: i32 },

    #[error("{entity} not found: {id}")]
    ReferenceNotFound { entity: String, id: i32 },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl From<DomainError> for AppointmentsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::AppointmentNotFound { id } => Self::NotFound { id },
            DomainError::ReferenceNotFound { entity, id } => Self::ReferenceNotFound {
                entity: entity.to_string(),
                id,
            },
            e @ (DomainError::InvalidStatusTransition { .. }
            | DomainError::ConcurrentUpdate { .. }) => Self::Conflict {
                message: e.to_string(),
            },
            e @ (DomainError::InvalidDateRange { .. } | DomainError::Validation { .. }) => {
                Self::Validation {
                    message: e.to_string(),
                }
            }
            DomainError::Database { .. } => Self::Internal,
        }
    }
}
