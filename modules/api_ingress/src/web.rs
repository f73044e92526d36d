use axum::{
    http::{StatusCode, Uri},
    response::Json,
};
use restkit::problem::{from_parts, ProblemResponse};
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Problem response for unmatched routes.
pub async fn route_not_found(uri: Uri) -> ProblemResponse {
    from_parts(
        StatusCode::NOT_FOUND,
        "ROUTE_NOT_FOUND",
        "Not found",
        format!("No route for {}", uri.path()),
        uri.path(),
    )
}
