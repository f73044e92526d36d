//! Root router behaviour: health, fallback, middleware stack and serving.

use api_ingress::{serve_on, ApiIngress, ApiIngressConfig};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    routing::post,
    Router,
};
use restkit::{problem::from_parts, JsonBody, ProblemResponse};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

async fn reject(JsonBody(_): JsonBody<serde_json::Value>) -> ProblemResponse {
    from_parts(StatusCode::CONFLICT, "TEST_CONFLICT", "Conflict", "nope", "/echo")
}

fn routes() -> Router {
    Router::new().route("/echo", post(reject))
}

fn router_with(config: ApiIngressConfig) -> Router {
    ApiIngress::new(config).build_router(routes()).unwrap()
}

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let resp = router_with(ApiIngressConfig::default())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let v = json_body(resp).await;
    assert_eq!(v["status"], "healthy");
    assert!(v["timestamp"].is_string());
}

#[tokio::test]
async fn unknown_route_is_problem_404() {
    let resp = router_with(ApiIngressConfig::default())
        .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let v = json_body(resp).await;
    assert_eq!(v["code"], "ROUTE_NOT_FOUND");
    assert!(v["request_id"].is_string());
}

#[tokio::test]
async fn problem_bodies_carry_the_request_id() {
    let resp = router_with(ApiIngressConfig::default())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-request-id", "rid-42")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "rid-42");
    let v = json_body(resp).await;
    assert_eq!(v["request_id"], "rid-42");
    assert_eq!(v["code"], "TEST_CONFLICT");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let router = router_with(ApiIngressConfig {
        body_limit_bytes: 16,
        ..Default::default()
    });
    let big = format!("{{\"pad\":\"{}\"}}", "x".repeat(64));
    let resp = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::CONTENT_LENGTH, big.len())
                .body(Body::from(big))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let router = router_with(ApiIngressConfig {
        cors_allowed_origins: vec!["http://localhost:5173".into()],
        ..Default::default()
    });
    let resp = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn cors_disabled_adds_no_headers() {
    let router = router_with(ApiIngressConfig {
        cors_enabled: false,
        ..Default::default()
    });
    let resp = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://elsewhere.test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(!resp
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn serve_answers_and_stops_on_cancel() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cancel = CancellationToken::new();
    let router = router_with(ApiIngressConfig::default());

    let server = tokio::spawn(serve_on(listener, router, cancel.clone()));

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();
    assert!(raw.starts_with("HTTP/1.1 200"), "unexpected response: {raw}");
    assert!(raw.contains("healthy"));

    cancel.cancel();
    server.await.unwrap().unwrap();
}
