use axum::http::StatusCode;
use restkit::problem::{from_parts, internal_db, ProblemResponse};

use crate::domain::error::DomainError;

pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::AppointmentNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "APPOINTMENTS_NOT_FOUND",
            "Appointment not found",
            format!("Appointment with id {id} was not found"),
            instance,
        ),
        DomainError::ReferenceNotFound { entity, id } => from_parts(
            StatusCode::NOT_FOUND,
            "APPOINTMENTS_REFERENCE_NOT_FOUND",
            "Referenced entity not found",
            format!("{entity} with id {id} was not found"),
            instance,
        ),
        DomainError::InvalidStatusTransition { .. } => from_parts(
            StatusCode::CONFLICT,
            "APPOINTMENTS_STATUS_CONFLICT",
            "Invalid status transition",
            e.to_string(),
            instance,
        ),
        DomainError::ConcurrentUpdate { .. } => from_parts(
            StatusCode::CONFLICT,
            "APPOINTMENTS_UPDATE_CONFLICT",
            "Concurrent update",
            e.to_string(),
            instance,
        ),
        DomainError::InvalidDateRange { .. } | DomainError::Validation { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "APPOINTMENTS_VALIDATION",
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::AppointmentStatus;

    #[test]
    fn status_codes() {
        let cases = [
            (DomainError::not_found(1), 404, "APPOINTMENTS_NOT_FOUND"),
            (
                DomainError::user_not_found(999),
                404,
                "APPOINTMENTS_REFERENCE_NOT_FOUND",
            ),
            (
                DomainError::InvalidStatusTransition {
                    from: AppointmentStatus::Cancelled,
                    to: AppointmentStatus::Pending,
                },
                409,
                "APPOINTMENTS_STATUS_CONFLICT",
            ),
            (
                DomainError::ConcurrentUpdate { id: 3 },
                409,
                "APPOINTMENTS_UPDATE_CONFLICT",
            ),
            (
                DomainError::validation("title", "too long"),
                400,
                "APPOINTMENTS_VALIDATION",
            ),
            (DomainError::database("boom"), 500, "INTERNAL_DB"),
        ];
        for (err, status, code) in cases {
            let p = map_domain_error(&err, "/appointments").0;
            assert_eq!(p.status, status, "{err}");
            assert_eq!(p.code, code);
        }
    }

    #[test]
    fn reference_detail_names_the_entity() {
        let p = map_domain_error(&DomainError::property_not_found(7), "/appointments").0;
        assert_eq!(p.detail, "Property with id 7 was not found");
    }
}
