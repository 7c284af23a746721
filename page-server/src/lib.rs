//! # Pagecraft Server Library
//!
//! Shared types and the HTTP router for the page server.
//! This library is used by both the binary and integration tests.
//!
//! The server owns a [`PageStore`] and exposes it over a small JSON API,
//! plus HTML render endpoints for the display and author surfaces and a
//! public `/p/{slug}` view for published pages.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, MatchedPath, Request},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use page_core::{PageStore, StoreError};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod config;
pub mod health;
pub mod metrics;
pub mod routes;
pub mod validation;

pub use config::{CliArgs, ServerConfig};
pub use validation::ValidationError;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Page storage.
    pub store: PageStore,
    /// Resolved configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create state over `store`.
    #[must_use]
    pub fn new(store: PageStore, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Errors returned by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// No such page, or the page is not public.
    #[error("Not found: {0}")]
    NotFound(String),
    /// Malformed request.
    #[error("Bad request: {0}")]
    BadRequest(String),
    /// The request conflicts with another page.
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::Store(StoreError::PageNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Validation(ref e) = self {
            metrics::record_validation_failure(e.kind());
        }
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build a CORS layer that only allows localhost origins.
///
/// The server binds to loopback only; browsers on other origins get no
/// CORS grant.
#[must_use]
pub fn build_cors_layer(port: u16) -> CorsLayer {
    let localhost_origins = [
        format!("http://localhost:{port}"),
        format!("http://127.0.0.1:{port}"),
        // Dev servers for the editor frontend
        "http://localhost:5173".to_string(), // Vite
        "http://127.0.0.1:5173".to_string(),
    ];

    let origins: Vec<HeaderValue> = localhost_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Record request count and latency against the matched route.
async fn track_metrics(request: Request, next: Next) -> Response {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());
    let method = request.method().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    metrics::record_http_request(
        method.as_str(),
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}

/// Build the application router.
///
/// `metrics_handle` mounts `/metrics` when a Prometheus recorder is installed;
/// tests pass `None` since only one recorder can exist per process.
pub fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let port = state.config.port;
    let mut app = Router::new()
        // Health check endpoints (Kubernetes probes)
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/health", get(health::readiness))
        .route("/api/components", get(routes::list_components))
        .route("/api/editor-config", get(routes::editor_config))
        .route("/api/pages", get(routes::list_pages))
        .route(
            "/api/pages/{page_id}",
            get(routes::get_page)
                .put(routes::put_page)
                .delete(routes::delete_page),
        )
        .route("/api/pages/{page_id}/render", get(routes::render_page))
        .route("/p/{slug}", get(routes::public_page))
        .with_state(state);

    if let Some(handle) = metrics_handle {
        let metrics_router = Router::new()
            .route("/metrics", get(routes::metrics_handler))
            .with_state(handle);
        app = app.merge(metrics_router);
    }

    app.layer(middleware::from_fn(track_metrics))
        // Replaces axum's 2MB extractor default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(validation::MAX_BODY_BYTES))
        // Request ID for distributed tracing correlation
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(build_cors_layer(port))
        // Structured request tracing with timing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router() -> Router {
        build_router(AppState::new(PageStore::new(), ServerConfig::default()), None)
    }

    #[tokio::test]
    async fn test_router_serves_liveness() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_router_maps_invalid_id_to_json_400() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/pages/bad%20id")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["error"], "page_id contains invalid characters");
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::Validation(ValidationError::PageIdInvalidChars).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Store(StoreError::PageNotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Store(StoreError::NoDataDir).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::Conflict("slug".into()).status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_error_message_is_user_facing() {
        let err = ApiError::from(ValidationError::SlugInvalidChars);
        assert_eq!(err.to_string(), "slug contains invalid characters");
    }
}
