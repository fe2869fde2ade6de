use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{Method, StatusCode};
use axum::{middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
};

mod config;
pub mod error;
pub mod request_id;
mod shutdown;
mod web;

pub use config::ApiIngressConfig;
pub use error::AppError;
pub use shutdown::wait_for_shutdown;

/// HTTP host: wraps module routers with the shared middleware stack and
/// owns the listener lifecycle.
pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new(ApiIngressConfig::default())
    }
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Resolve the listen address, using `fallback` when `bind_addr` is not configured.
    pub fn bind_addr(&self, fallback: &str) -> Result<SocketAddr> {
        let configured = self.config.bind_addr.trim();
        let raw = if configured.is_empty() {
            fallback
        } else {
            configured
        };
        raw.parse()
            .with_context(|| format!("Invalid bind address '{raw}'"))
    }

    /// Build the HTTP router around the module routes.
    pub fn build_router(&self, routes: Router) -> Router {
        let config = &self.config;
        tracing::debug!(?config, "Building router");

        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .route("/healthz", get(web::healthz))
            .merge(routes);

        if let Some(dir) = config.static_dir.as_deref().filter(|d| !d.trim().is_empty()) {
            tracing::info!(static_dir = %dir, "Serving static files");
            router = router.fallback_service(ServeDir::new(dir));
        }

        // Layers are added innermost first. Resulting order (outermost to innermost):
        // SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions
        //   -> Timeout -> CORS -> BodyLimit
        router = router
            .layer(DefaultBodyLimit::max(config.body_limit_bytes))
            .layer(RequestBodyLimitLayer::new(config.body_limit_bytes));

        if config.cors_enabled {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([
                        Method::GET,
                        Method::POST,
                        Method::OPTIONS,
                        Method::PATCH,
                        Method::PUT,
                        Method::DELETE,
                    ])
                    .allow_headers(Any),
            );
        }

        let x_request_id = request_id::header();
        router
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.request_timeout_secs.max(1)),
            ))
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
    }

    /// Bind the listener. Binding is the readiness point.
    pub async fn bind(&self, fallback_addr: &str) -> Result<TcpListener> {
        let addr = self.bind_addr(fallback_addr)?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        tracing::info!("HTTP server bound on {}", listener.local_addr()?);
        Ok(listener)
    }

    /// Serve until `cancel` fires, then drain in-flight requests.
    pub async fn serve(
        &self,
        listener: TcpListener,
        router: Router,
        cancel: CancellationToken,
    ) -> Result<()> {
        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server failed")
    }
}
