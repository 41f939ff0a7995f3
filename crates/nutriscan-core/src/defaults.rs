//! Centralized default constants for the nutriscan service.
//!
//! **This module is the single source of truth** for all shared default
//! values. The other crates reference these constants instead of defining
//! their own magic numbers.

// =============================================================================
// UPLOADS
// =============================================================================

/// Maximum accepted upload size in bytes. Uploads over this ceiling are
/// rejected with HTTP 413 before any model call is made.
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Mime type assumed when the upload does not declare one.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

// =============================================================================
// MODEL PROVIDER
// =============================================================================

/// Default Gemini API base URL.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default vision model identifier.
pub const GEMINI_MODEL: &str = "gemini-2.0-flash-lite";

/// Default provider request timeout in seconds.
pub const GEMINI_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the provider API key.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Environment variable overriding the provider base URL.
pub const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";

/// Environment variable overriding the model identifier.
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";

/// Environment variable overriding the request timeout (seconds).
pub const ENV_GEMINI_TIMEOUT: &str = "GEMINI_TIMEOUT";

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Outer request body limit. Deliberately larger than [`MAX_UPLOAD_BYTES`]
/// so the service's own ceiling check produces the shaped 413 response
/// instead of the framework's bare one.
pub const BODY_LIMIT_BYTES: usize = 8 * MAX_UPLOAD_BYTES;
