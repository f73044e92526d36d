use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::IntoResponse,
    routing::{delete, post},
    Router,
};
use restkit::{created_json, deleted, JsonBody, PathId, Problem, APPLICATION_PROBLEM_JSON};
use serde::{Deserialize, Serialize};
use tower::ServiceExt;

#[derive(Debug, Serialize, Deserialize)]
struct Payload {
    name: String,
    count: i32,
}

async fn echo(JsonBody(p): JsonBody<Payload>) -> impl IntoResponse {
    created_json(p)
}

async fn remove(PathId(id): PathId) -> impl IntoResponse {
    let _ = id;
    deleted("Thing")
}

fn app() -> Router {
    Router::new()
        .route("/things", post(echo))
        .route("/things/{id}", delete(remove))
}

async fn problem_of(resp: axum::response::Response) -> Problem {
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        APPLICATION_PROBLEM_JSON
    );
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/things")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn valid_body_is_accepted() {
    let resp = app()
        .oneshot(post_json(r#"{"name":"a","count":2}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn malformed_json_is_invalid_body() {
    let resp = app().oneshot(post_json("{not json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let p = problem_of(resp).await;
    assert_eq!(p.code, "INVALID_BODY");
    assert_eq!(p.instance, "/things");
}

#[tokio::test]
async fn missing_field_is_invalid_body() {
    let resp = app().oneshot(post_json(r#"{"name":"a"}"#)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(problem_of(resp).await.code, "INVALID_BODY");
}

#[tokio::test]
async fn wrong_type_is_invalid_body() {
    let resp = app()
        .oneshot(post_json(r#"{"name":"a","count":"two"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(problem_of(resp).await.code, "INVALID_BODY");
}

#[tokio::test]
async fn non_integer_id_is_invalid_id() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/things/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let p = problem_of(resp).await;
    assert_eq!(p.code, "INVALID_ID");
    assert!(p.detail.contains("abc"));
}

#[tokio::test]
async fn delete_returns_message() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/things/7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["message"], "Thing deleted successfully");
}
