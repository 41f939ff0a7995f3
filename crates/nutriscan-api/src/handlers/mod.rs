//! HTTP handler modules for nutriscan-api.

pub mod analyze;
pub mod demo;
