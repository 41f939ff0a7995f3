//! Structured logging field name constants for nutriscan.
//!
//! All crates use these constants for consistent structured logging fields
//! so log aggregation tools can query by standardized names.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated through the request. Format: UUIDv7.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event. Values: "api", "inference".
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name. Examples: "normalize", "analyze", "generate".
pub const OPERATION: &str = "op";

// ─── Payload fields ────────────────────────────────────────────────────────

/// Size of the uploaded image in bytes.
pub const IMAGE_BYTES: &str = "image_bytes";

/// Declared mime type of the upload.
pub const MIME_TYPE: &str = "mime_type";

/// Model identifier used for the provider call.
pub const MODEL: &str = "model";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of the model's textual reply.
pub const RESPONSE_LEN: &str = "response_len";
