//! # nutriscan-core
//!
//! Core types, errors, and defaults for the nutriscan service.
//!
//! This crate provides the foundational data structures shared by the
//! inference and API crates:
//!
//! - [`UploadedImage`]: a normalized per-request image payload
//! - [`AnalysisResult`]: the reconciled model output returned to callers
//! - [`LabelDetection`]: the internal form of the wire discriminant
//! - [`Error`]/[`Result`]: the service-wide error taxonomy
//! - [`defaults`]: single source of truth for shared constants
//! - [`logging`]: structured-logging field name constants

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;

pub use error::{Error, Result};
pub use models::{AnalysisResult, LabelDetection, UploadedImage};
