use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// 200 OK + JSON
pub fn ok_json<T: Serialize>(value: T) -> impl IntoResponse {
    (StatusCode::OK, Json(value))
}

/// 201 Created + JSON
pub fn created_json<T: Serialize>(value: T) -> impl IntoResponse {
    (StatusCode::CREATED, Json(value))
}

/// `{"message": "..."}` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// 200 OK + `{"message":"<Entity> deleted successfully"}`
pub fn deleted(entity: &str) -> impl IntoResponse {
    ok_json(MessageResponse {
        message: format!("{entity} deleted successfully"),
    })
}
