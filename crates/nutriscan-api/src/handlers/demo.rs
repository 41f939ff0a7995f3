//! Demo routes: a browser upload page and a plain text-prompt probe.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;

use crate::AppState;

/// Serve the demo upload page.
///
/// The page resizes/re-encodes the photo client-side before POSTing to
/// `/analyze`. That preprocessing is a convenience only — the service never
/// assumes it happened.
pub async fn demo_page() -> Html<&'static str> {
    Html(include_str!("../../assets/demo.html"))
}

/// Text-only probe against the same backend, useful for checking that the
/// provider credential and model are wired up without needing a photo.
pub async fn example_prompt(State(state): State<AppState>) -> Response {
    match state.vision.generate_text("Why is the sky blue?").await {
        Ok(text) => format!("Response: {}", text).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Text generation probe failed");
            Json(serde_json::json!({ "error": "Failed to generate content" })).into_response()
        }
    }
}
