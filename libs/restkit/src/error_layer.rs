//! Response post-processing for problem bodies.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::problem::{Problem, APPLICATION_PROBLEM_JSON};

const X_REQUEST_ID: &str = "x-request-id";

/// Problem bodies are small; anything larger is passed through untouched.
const MAX_PROBLEM_BYTES: usize = 64 * 1024;

/// Middleware that copies the request id into `request_id` of problem+json responses.
///
/// Must run inside the layer that assigns `x-request-id`.
pub async fn attach_request_id(request: Request, next: Next) -> Response {
    let request_id = request.headers().get(X_REQUEST_ID).cloned();
    let response = next.run(request).await;

    match request_id {
        Some(id) if is_problem_response(&response) => with_request_id(response, id).await,
        _ => response,
    }
}

/// Check if a response is already a Problem+JSON response
pub fn is_problem_response(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with(APPLICATION_PROBLEM_JSON))
        .unwrap_or(false)
}

async fn with_request_id(response: Response, id: HeaderValue) -> Response {
    let Ok(id) = id.to_str().map(str::to_owned) else {
        return response;
    };

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_PROBLEM_BYTES).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(error = %e, "failed to buffer problem body");
            return Response::from_parts(parts, Body::empty());
        }
    };

    let body = match serde_json::from_slice::<Problem>(&bytes) {
        Ok(problem) if problem.request_id.is_none() => {
            match serde_json::to_vec(&problem.with_request_id(id)) {
                Ok(buf) => buf.into(),
                Err(_) => bytes,
            }
        }
        _ => bytes,
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{from_parts, ProblemResponse};
    use axum::{http::StatusCode, middleware, response::IntoResponse, routing::get, Router};
    use tower::ServiceExt;

    async fn failing() -> ProblemResponse {
        from_parts(StatusCode::NOT_FOUND, "X_NOT_FOUND", "Not found", "gone", "/x")
    }

    fn app() -> Router {
        Router::new()
            .route("/x", get(failing))
            .route("/ok", get(|| async { "fine".into_response() }))
            .layer(middleware::from_fn(attach_request_id))
    }

    #[tokio::test]
    async fn problem_gets_request_id_from_header() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/x")
                    .header(X_REQUEST_ID, "req-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(is_problem_response(&resp));
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let p: Problem = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(p.request_id.as_deref(), Some("req-1"));
        assert_eq!(p.code, "X_NOT_FOUND");
    }

    #[tokio::test]
    async fn non_problem_responses_pass_through() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/ok")
                    .header(X_REQUEST_ID, "req-2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(!is_problem_response(&resp));
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"fine");
    }
}
