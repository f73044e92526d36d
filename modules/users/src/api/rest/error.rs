use axum::http::StatusCode;
use restkit::problem::{from_parts, internal_db, ProblemResponse};

use crate::domain::error::DomainError;

/// Map domain error to RFC 9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::UserNotFound { id } => not_found(*id, instance),
        DomainError::EmailAlreadyExists { email } => from_parts(
            StatusCode::CONFLICT,
            "USERS_EMAIL_CONFLICT",
            "Email already exists",
            format!("Email '{email}' is already in use"),
            instance,
        ),
        DomainError::InvalidEmail { .. }
        | DomainError::EmptyName
        | DomainError::NameTooLong { .. }
        | DomainError::Validation { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "USERS_VALIDATION",
            "Validation error",
            e.to_string(),
            instance,
        ),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            internal_db(instance)
        }
    }
}

pub fn not_found(id: i32, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::NOT_FOUND,
        "USERS_NOT_FOUND",
        "User not found",
        format!("User with id {id} was not found"),
        instance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let cases = [
            (DomainError::user_not_found(1), 404, "USERS_NOT_FOUND"),
            (
                DomainError::email_already_exists("a@b.c".into()),
                409,
                "USERS_EMAIL_CONFLICT",
            ),
            (DomainError::invalid_email("x".into()), 400, "USERS_VALIDATION"),
            (DomainError::empty_name(), 400, "USERS_VALIDATION"),
            (DomainError::name_too_long(300, 100), 400, "USERS_VALIDATION"),
            (DomainError::database("boom"), 500, "INTERNAL_DB"),
        ];
        for (err, status, code) in cases {
            let p = map_domain_error(&err, "/users").0;
            assert_eq!(p.status, status, "{err}");
            assert_eq!(p.code, code);
        }
    }

    #[test]
    fn database_details_are_hidden() {
        let p = map_domain_error(&DomainError::database("SQLITE_BUSY at users.db"), "/users").0;
        assert!(!p.detail.contains("SQLITE"));
    }
}
