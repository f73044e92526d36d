use axum::http::StatusCode;
use restkit::problem::{from_parts, internal_db, ProblemResponse};

use crate::domain::error::DomainError;

pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::PropertyNotFound { id } => not_found(*id, instance),
        DomainError::InvalidArea { .. }
        | DomainError::EmptyAddress
        | DomainError::AddressTooLong { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "PROPERTIES_VALIDATION",
            "Validation error",
            e.to_string(),
            instance,
        ),
        DomainError::Database { .. } => {
            tracing::error!(error = ?e, "Database error occurred");
            internal_db(instance)
        }
    }
}

pub fn not_found(id: i32, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::NOT_FOUND,
        "PROPERTIES_NOT_FOUND",
        "Property not found",
        format!("Property with id {id} was not found"),
        instance,
    )
}
