//! Extractors whose rejections are problem responses instead of axum's plain text.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::problem::{invalid_body, invalid_id, ProblemResponse};

/// Integer `{id}` path segment. Anything that is not an `i32` is a 400 `INVALID_ID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i32);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let instance = parts.uri.path().to_string();
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rej| invalid_id(rej.body_text(), &instance))?;

        raw.parse::<i32>()
            .map(PathId)
            .map_err(|_| invalid_id(format!("'{raw}' is not a valid id"), &instance))
    }
}

/// JSON body; decoding failures are a 400 `INVALID_BODY`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let instance = req.uri().path().to_string();
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rej) => {
                tracing::debug!(path = %instance, error = %rej.body_text(), "rejected request body");
                Err(invalid_body(rej.body_text(), &instance))
            }
        }
    }
}
