//! nutriscan-api - HTTP API server for nutriscan.
//!
//! Exposes the analyze endpoint (raw binary or multipart image upload →
//! reconciled nutrition JSON), a demo upload page, and a health probe.
//! The router is built here so integration tests can drive it in-process
//! with a mock backend.

pub mod handlers;
pub mod ingress;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use nutriscan_core::{defaults, AnalysisResult, Error};
use nutriscan_inference::VisionBackend;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation when chasing a misbehaving upload through the pipeline.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared immutable state: the vision backend plus request limits.
///
/// No process-wide singletons — the backend (and its credential) is injected
/// here at construction.
#[derive(Clone)]
pub struct AppState {
    pub vision: Arc<dyn VisionBackend>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(vision: Arc<dyn VisionBackend>) -> Self {
        Self {
            vision,
            max_upload_bytes: defaults::MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

/// Boundary mapping from the error taxonomy to HTTP responses.
///
/// Only `PayloadTooLarge` gets a distinct status (413). Every other kind is
/// answered 200 with an error-shaped [`AnalysisResult`] — callers read the
/// discriminant field, not the status, to learn whether usable data is
/// present. An unhandled error never escapes as a bare 500.
pub(crate) struct ErrorResponse(pub Error);

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::OK,
        };
        (status, Json(AnalysisResult::failure(self.0.to_string()))).into_response()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router with the full middleware stack.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::demo::demo_page))
        .route("/health", get(|| async { "ok" }))
        .route("/example", get(handlers::demo::example_prompt))
        .route("/analyze", post(handlers::analyze::analyze))
        .route("/example/analyze", post(handlers::analyze::analyze))
        .with_state(state)
        // Outer limit is generous on purpose: the ingress layer enforces the
        // real ceiling so the 413 carries the shaped JSON body.
        .layer(DefaultBodyLimit::max(defaults::BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        let status = res.status();
                        if status.is_server_error() {
                            tracing::error!(%status, duration_ms = latency.as_millis() as u64, "response");
                        } else {
                            tracing::info!(%status, duration_ms = latency.as_millis() as u64, "response");
                        }
                    },
                ),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(CatchPanicLayer::new())
}
