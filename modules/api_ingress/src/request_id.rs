//! Request ids and the per-request span.
//!
//! A client-supplied `x-request-id` is kept, otherwise a nanoid is assigned.
//! Either way the id is echoed on the response, available to handlers as a
//! [`RequestId`] extension and recorded on the `http_request` span.

use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderName, Request, Response};
use axum::Router;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::field::Empty;
use tracing::Span;

pub fn request_id_header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NanoRequestId;

impl MakeRequestId for NanoRequestId {
    fn make_request_id<B>(&mut self, _req: &Request<B>) -> Option<RequestId> {
        nanoid::nanoid!().parse().ok().map(RequestId::new)
    }
}

/// Id assigned to `req`; `-` outside [`instrument`].
pub fn request_id_of<B>(req: &Request<B>) -> &str {
    req.extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("-")
}

fn request_span(req: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        path = %req.uri().path(),
        request_id = %request_id_of(req),
        status = Empty,
        latency_ms = Empty,
    )
}

fn record_response(res: &Response<Body>, latency: Duration, span: &Span) {
    span.record("status", res.status().as_u16());
    span.record("latency_ms", u64::try_from(latency.as_millis()).unwrap_or(u64::MAX));
    tracing::debug!("request finished");
}

/// Give every request through `router` an id and run it inside `http_request`.
pub fn instrument(router: Router) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(request_span)
        .on_response(record_response);

    // Outermost last: ids are assigned before the span opens.
    router
        .layer(trace)
        .layer(PropagateRequestIdLayer::new(request_id_header()))
        .layer(SetRequestIdLayer::new(request_id_header(), NanoRequestId))
}
