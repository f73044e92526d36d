//! HTTP ingress: owns the root router, the global middleware stack and the
//! server loop. Entity modules hand in their routers; nothing here knows about
//! users, properties or appointments.

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware::from_fn,
    routing::get,
    Router,
};
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Address to bind: `bind_addr` when configured, otherwise `fallback` (`host:port`).
    pub fn bind_addr(&self, fallback: &str) -> Result<SocketAddr> {
        let raw = if self.config.bind_addr.trim().is_empty() {
            fallback
        } else {
            self.config.bind_addr.trim()
        };
        raw.to_socket_addrs()
            .with_context(|| format!("Invalid bind address '{raw}'"))?
            .next()
            .with_context(|| format!("Bind address '{raw}' did not resolve"))
    }

    /// Root router: health check, module routes, fallback and the middleware stack.
    pub fn build_router(&self, routes: Router) -> Result<Router> {
        tracing::debug!("Building root router");
        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .merge(routes)
            .fallback(web::route_not_found);

        // Layers are added innermost first. Resulting order, outermost to innermost:
        // SetRequestId -> PropagateRequestId -> Trace -> attach_request_id
        //   -> Timeout -> CORS -> BodyLimit
        let limit = self.config.body_limit_bytes;
        router = router
            .layer(DefaultBodyLimit::max(limit))
            .layer(RequestBodyLimitLayer::new(limit));

        if self.config.cors_enabled {
            router = router.layer(self.cors_layer()?);
        }

        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            self.config.request_timeout_sec.max(1),
        )));

        router = router.layer(from_fn(restkit::error_layer::attach_request_id));
        Ok(request_id::instrument(router))
    }

    fn cors_layer(&self) -> Result<CorsLayer> {
        if self.config.cors_allowed_origins.is_empty() {
            return Ok(CorsLayer::permissive());
        }

        let origins = self
            .config
            .cors_allowed_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{o}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any))
    }

    /// Bind `addr` and serve until `cancel` fires.
    pub async fn serve(&self, router: Router, addr: SocketAddr, cancel: CancellationToken) -> Result<()> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        serve_on(listener, router, cancel).await
    }
}

/// Serve on an already bound listener until `cancel` fires; in-flight requests are drained.
pub async fn serve_on(listener: TcpListener, router: Router, cancel: CancellationToken) -> Result<()> {
    let local = listener.local_addr()?;
    tracing::info!("HTTP server bound on {}", local);

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_prefers_config() {
        let ingress = ApiIngress::new(ApiIngressConfig {
            bind_addr: "0.0.0.0:9000".into(),
            ..Default::default()
        });
        assert_eq!(
            ingress.bind_addr("127.0.0.1:3000").unwrap(),
            "0.0.0.0:9000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn bind_addr_falls_back_to_server_section() {
        let ingress = ApiIngress::new(ApiIngressConfig::default());
        assert_eq!(ingress.bind_addr("127.0.0.1:3000").unwrap().port(), 3000);
        assert!(ingress.bind_addr("not an address").is_err());
        assert_eq!(ingress.bind_addr("localhost:3100").unwrap().port(), 3100);
    }

    #[test]
    fn invalid_cors_origin_fails_router_build() {
        let ingress = ApiIngress::new(ApiIngressConfig {
            cors_allowed_origins: vec!["bad\norigin".into()],
            ..Default::default()
        });
        assert!(ingress.build_router(Router::new()).is_err());
    }
}
