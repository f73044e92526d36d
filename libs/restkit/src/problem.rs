//! RFC 9457 problem details.
//!
//! Every error response is a coded problem: `code` is the stable machine
//! readable name (`USERS_NOT_FOUND`) and `type` is derived from it.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

const TYPE_BASE: &str = "https://errors.rental.local";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    /// Request path the problem belongs to.
    pub instance: String,
    pub code: String,
    /// Set by the ingress middleware, never by handlers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl Problem {
    pub fn coded(
        status: StatusCode,
        code: &str,
        title: &str,
        detail: impl Into<String>,
        instance: &str,
    ) -> Self {
        Self {
            type_url: format!("{TYPE_BASE}/{code}"),
            title: title.to_owned(),
            status: status.as_u16(),
            detail: detail.into(),
            instance: instance.to_owned(),
            code: code.to_owned(),
            request_id: None,
        }
    }

    pub fn with_request_id(self, id: impl Into<String>) -> Self {
        Self {
            request_id: Some(id.into()),
            ..self
        }
    }

    /// Out-of-range codes render as 500.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Handler-facing error type; renders the problem with its status and
/// `application/problem+json`.
#[derive(Debug, Clone)]
pub struct ProblemResponse(pub Problem);

impl From<Problem> for ProblemResponse {
    fn from(problem: Problem) -> Self {
        Self(problem)
    }
}

impl IntoResponse for ProblemResponse {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let content_type = [(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        )];
        (status, content_type, Json(self.0)).into_response()
    }
}

pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    Problem::coded(status, code, title, detail, instance).into()
}

pub fn invalid_id(detail: impl Into<String>, instance: &str) -> ProblemResponse {
    from_parts(StatusCode::BAD_REQUEST, "INVALID_ID", "Invalid id", detail, instance)
}

pub fn invalid_body(detail: impl Into<String>, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "INVALID_BODY",
        "Invalid request body",
        detail,
        instance,
    )
}

/// The cause is not exposed; callers log it before answering.
pub fn internal_db(instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_DB",
        "Internal error",
        "An internal database error occurred",
        instance,
    )
}
