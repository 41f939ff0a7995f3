//! The analyze endpoint: image upload → reconciled nutrition JSON.

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::instrument;

use nutriscan_core::logging;

use crate::{ingress, AppState, ErrorResponse};

/// Analyze a photographed nutrition label.
///
/// Accepts either a raw `image/*` body or a multipart form with one file
/// part. Always answers with an `AnalysisResult` JSON body; the only
/// non-200 path is an upload over the size ceiling (413). Model failures
/// and unreadable photos still produce 200 — the `nutrition_label_found`
/// discriminant is the caller's signal, not the status code.
#[instrument(skip_all, fields(op = "analyze"))]
pub async fn analyze(State(state): State<AppState>, request: Request) -> Response {
    let image = match ingress::normalize(request, state.max_upload_bytes).await {
        Ok(image) => image,
        Err(err) => return ErrorResponse(err).into_response(),
    };

    tracing::debug!(
        { logging::IMAGE_BYTES } = image.len(),
        { logging::MIME_TYPE } = %image.mime_type,
        { logging::MODEL } = state.vision.model_name(),
        "Dispatching image to vision backend"
    );

    let result = nutriscan_inference::analyze_image(state.vision.as_ref(), &image).await;
    Json(result).into_response()
}
