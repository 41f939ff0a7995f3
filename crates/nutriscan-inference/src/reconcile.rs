//! Reconciliation of loosely-formatted model output into an
//! [`AnalysisResult`].
//!
//! The model is instructed to answer in bare JSON but does not reliably do
//! so: replies arrive wrapped in markdown code fences, in prose, or in a
//! shape that is not JSON at all. The fallback ladder here is deliberate
//! graceful degradation — malformed output is surfaced to the caller with
//! the negative discriminant rather than treated as a hard failure.

use serde_json::Value;
use tracing::{debug, warn};

use nutriscan_core::{logging, AnalysisResult, UploadedImage};

use crate::prompt::NUTRITION_PROMPT;
use crate::vision::VisionBackend;

/// Remove markdown code-fence artifacts surrounding an embedded JSON
/// payload: a leading ```` ```json ```` marker, trailing fences, and any
/// bare ```` ``` ```` markers.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json\n", "")
        .replace("\n```", "")
        .replace("```", "")
}

/// Reduce the model's raw textual reply to an [`AnalysisResult`].
///
/// Fence-stripped text that parses as a JSON object is relayed verbatim
/// (no schema validation beyond the parse). Anything else — prose, bare
/// JSON scalars, objects that contradict the schema's field types — takes
/// the `response` fallback path so the discriminant is always present.
pub fn reconcile_text(raw_text: &str) -> AnalysisResult {
    let cleaned = strip_code_fences(raw_text);

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value @ Value::Object(_)) => match serde_json::from_value(value) {
            Ok(result) => result,
            Err(e) => {
                warn!({ logging::SUBSYSTEM } = "inference", error = %e, "Model JSON contradicts schema");
                AnalysisResult::unparsed(raw_text)
            }
        },
        Ok(_) | Err(_) => {
            debug!(
                { logging::SUBSYSTEM } = "inference",
                { logging::RESPONSE_LEN } = raw_text.len(),
                "Model reply is not a JSON object, relaying raw text"
            );
            AnalysisResult::unparsed(raw_text)
        }
    }
}

/// Run the full analysis pipeline for one image: provider call, envelope
/// extraction, fence stripping, JSON reconciliation.
///
/// Never fails — every error becomes an error-shaped result with the
/// negative discriminant, matching the service's uniform-response-shape
/// policy. A single model call is attempted; there are no retries.
pub async fn analyze_image(
    backend: &dyn VisionBackend,
    image: &UploadedImage,
) -> AnalysisResult {
    match backend.analyze_image(image, NUTRITION_PROMPT).await {
        Ok(text) => reconcile_text(&text),
        Err(e) => {
            warn!(
                { logging::SUBSYSTEM } = "inference",
                { logging::OPERATION } = "analyze",
                { logging::IMAGE_BYTES } = image.len(),
                error = %e,
                "Image analysis failed"
            );
            AnalysisResult::failure(format!("Failed to process image: {}", e))
        }
    }
}
