//! Vision backend trait: the seam between the HTTP layer and the model
//! provider.

use async_trait::async_trait;
use nutriscan_core::{Result, UploadedImage};

/// Backend for analyzing images (and running plain text prompts) with a
/// vision LLM.
///
/// Implementations return the model's raw textual reply; interpreting that
/// text is the reconciler's job, not the backend's.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// Submit an image plus an instruction prompt, returning the model's
    /// textual reply.
    async fn analyze_image(&self, image: &UploadedImage, prompt: &str) -> Result<String>;

    /// Submit a text-only prompt, returning the model's textual reply.
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
