//! # nutriscan-inference
//!
//! Vision model backend abstraction and response reconciliation for
//! nutriscan.
//!
//! This crate provides:
//! - Pluggable vision backend trait ([`VisionBackend`])
//! - Gemini `generateContent` implementation ([`GeminiBackend`])
//! - The fixed nutrition-label instruction prompt
//! - Reconciliation of loosely-formatted model output into an
//!   [`nutriscan_core::AnalysisResult`] with graceful fallback semantics
//!
//! # Feature Flags
//!
//! - `mock`: expose [`mock::MockVisionBackend`] to downstream test suites

pub mod gemini;
pub mod prompt;
pub mod reconcile;
pub mod vision;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use gemini::{GeminiBackend, GeminiConfig};
pub use prompt::NUTRITION_PROMPT;
pub use reconcile::{analyze_image, reconcile_text, strip_code_fences};
pub use vision::VisionBackend;
