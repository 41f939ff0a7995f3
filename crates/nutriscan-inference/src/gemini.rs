//! Gemini `generateContent` backend implementation.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use nutriscan_core::{defaults, logging, Error, Result, UploadedImage};

use crate::vision::VisionBackend;

/// Configuration for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier (e.g., "gemini-2.0-flash-lite").
    pub model: String,
    /// Request timeout in seconds. Applied to every provider call; the
    /// reference deployment had no deadline at all, which is not acceptable
    /// for a blocking network dependency.
    pub timeout_seconds: u64,
}

impl GeminiConfig {
    /// Create from environment variables. Fails if the API key is unset.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(defaults::ENV_GEMINI_API_KEY).map_err(|_| {
            Error::Config(format!(
                "{} environment variable is not set",
                defaults::ENV_GEMINI_API_KEY
            ))
        })?;

        Ok(Self {
            base_url: std::env::var(defaults::ENV_GEMINI_BASE_URL)
                .unwrap_or_else(|_| defaults::GEMINI_BASE_URL.to_string()),
            api_key,
            model: std::env::var(defaults::ENV_GEMINI_MODEL)
                .unwrap_or_else(|_| defaults::GEMINI_MODEL.to_string()),
            timeout_seconds: std::env::var(defaults::ENV_GEMINI_TIMEOUT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::GEMINI_TIMEOUT_SECS),
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types (camelCase per the Gemini REST API)
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
}

#[derive(Serialize)]
struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    /// Base64-encoded image bytes.
    data: String,
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Gemini vision backend over the REST `generateContent` endpoint.
pub struct GeminiBackend {
    client: Client,
    config: GeminiConfig,
}

impl GeminiBackend {
    /// Create a new backend with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            { logging::MODEL } = %config.model,
            base_url = %config.base_url,
            timeout_s = config.timeout_seconds,
            "Initializing Gemini backend"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    async fn generate(&self, parts: Vec<GeminiPart>) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts,
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!({ logging::MODEL } = %self.config.model, %status, "Provider call failed");
            return Err(Error::Inference(format!(
                "Gemini API returned {}: {}",
                status, body
            )));
        }

        let envelope: Value = response.json().await?;
        let text = extract_text(&envelope)?;
        debug!(
            { logging::MODEL } = %self.config.model,
            { logging::RESPONSE_LEN } = text.len(),
            "Provider call succeeded"
        );
        Ok(text)
    }
}

#[async_trait]
impl VisionBackend for GeminiBackend {
    async fn analyze_image(&self, image: &UploadedImage, prompt: &str) -> Result<String> {
        let image_b64 = base64::engine::general_purpose::STANDARD.encode(&image.bytes);

        self.generate(vec![
            GeminiPart::Text {
                text: prompt.to_string(),
            },
            GeminiPart::InlineData {
                inline_data: GeminiInlineData {
                    mime_type: image.mime_type.clone(),
                    data: image_b64,
                },
            },
        ])
        .await
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.generate(vec![GeminiPart::Text {
            text: prompt.to_string(),
        }])
        .await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// ---------------------------------------------------------------------------
// Envelope text extraction
// ---------------------------------------------------------------------------

/// Extract the textual payload from a provider response envelope.
///
/// The shape of the reply has drifted across provider/client versions, so
/// this probes an ordered chain of known shapes rather than trusting one:
///
/// 1. `candidates[0].content.parts[*].text` — the REST API shape
/// 2. `response.text` — nested response-object shape
/// 3. `text` — bare top-level string field
///
/// A reply matching none of them is a [`Error::ResponseFormat`].
pub(crate) fn extract_text(envelope: &Value) -> Result<String> {
    if let Some(parts) = envelope
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
    {
        let text: String = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect();
        if !text.is_empty() {
            return Ok(text);
        }
    }

    if let Some(text) = envelope.pointer("/response/text").and_then(Value::as_str) {
        return Ok(text.to_string());
    }

    if let Some(text) = envelope.get("text").and_then(Value::as_str) {
        return Ok(text.to_string());
    }

    Err(Error::ResponseFormat(format!(
        "no text payload in response envelope: {}",
        truncate(&envelope.to_string(), 200)
    )))
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
