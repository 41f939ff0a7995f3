//! Mock vision backend for deterministic testing.
//!
//! Provides an in-process stand-in for the model provider with fixed
//! responses, optional forced failure, and a call log for assertions.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use nutriscan_core::{Error, Result, UploadedImage};

use crate::vision::VisionBackend;

/// Mock vision backend for testing.
#[derive(Clone)]
pub struct MockVisionBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    response: String,
    error: Option<String>,
    model: String,
}

/// One logged backend invocation.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub prompt: String,
    pub image_bytes: usize,
    pub mime_type: Option<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            response: "{\"nutrition_label_found\":\"false\"}".to_string(),
            error: None,
            model: "mock-vision".to_string(),
        }
    }
}

impl MockVisionBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the fixed textual reply for every call.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).response = response.into();
        self
    }

    /// Make every call fail with an inference error.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).error = Some(message.into());
        self
    }

    /// Set the reported model name.
    pub fn with_model_name(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).model = model.into();
        self
    }

    /// Get all logged calls for assertion.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of `analyze_image` calls made.
    pub fn analyze_call_count(&self) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == "analyze_image")
            .count()
    }

    fn answer(&self) -> Result<String> {
        match &self.config.error {
            Some(message) => Err(Error::Inference(message.clone())),
            None => Ok(self.config.response.clone()),
        }
    }
}

impl Default for MockVisionBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionBackend for MockVisionBackend {
    async fn analyze_image(&self, image: &UploadedImage, prompt: &str) -> Result<String> {
        self.call_log.lock().unwrap().push(MockCall {
            operation: "analyze_image".to_string(),
            prompt: prompt.to_string(),
            image_bytes: image.len(),
            mime_type: Some(image.mime_type.clone()),
        });
        self.answer()
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.call_log.lock().unwrap().push(MockCall {
            operation: "generate_text".to_string(),
            prompt: prompt.to_string(),
            image_bytes: 0,
            mime_type: None,
        });
        self.answer()
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
