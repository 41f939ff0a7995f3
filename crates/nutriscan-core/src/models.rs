//! Data models for the nutriscan request/response cycle.
//!
//! All types here are request-scoped: an [`UploadedImage`] is constructed
//! from the ingress source, handed to the model backend, and discarded; an
//! [`AnalysisResult`] is produced once and returned as the response body.
//! Nothing is persisted.

use bytes::Bytes;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::defaults;

/// A normalized per-request image payload.
///
/// Produced by the ingress layer from either a raw binary body or a
/// multipart file part. The mime type is never empty; undeterminable
/// uploads default to [`defaults::DEFAULT_MIME_TYPE`].
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub bytes: Bytes,
    pub mime_type: String,
}

impl UploadedImage {
    /// Create an uploaded image, defaulting the mime type when the source
    /// did not declare one.
    pub fn new(bytes: Bytes, mime_type: Option<String>) -> Self {
        let mime_type = match mime_type {
            Some(m) if !m.is_empty() => m,
            _ => defaults::DEFAULT_MIME_TYPE.to_string(),
        };
        Self { bytes, mime_type }
    }

    /// Size of the image payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Whether a nutrition label was detected in the image.
///
/// The wire format uses the string sentinels `"true"`/`"false"` (inherited
/// from the model's own output convention); internal logic only ever sees
/// this enum. Deserialization also tolerates native booleans since the model
/// is not contractually bound to the sentinel form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelDetection {
    Found,
    #[default]
    NotFound,
}

impl LabelDetection {
    /// The literal sentinel written to the wire.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Self::Found => "true",
            Self::NotFound => "false",
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found)
    }
}

impl std::fmt::Display for LabelDetection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl Serialize for LabelDetection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire_str())
    }
}

impl<'de> Deserialize<'de> for LabelDetection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SentinelVisitor;

        impl Visitor<'_> for SentinelVisitor {
            type Value = LabelDetection;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("\"true\", \"false\", or a boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                match v {
                    "true" => Ok(LabelDetection::Found),
                    "false" => Ok(LabelDetection::NotFound),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(if v {
                    LabelDetection::Found
                } else {
                    LabelDetection::NotFound
                })
            }
        }

        deserializer.deserialize_any(SentinelVisitor)
    }
}

/// The reconciled model output returned to callers.
///
/// On the happy path this mirrors the JSON the model produced, numeric
/// fields and all. On failure paths only the discriminant plus `error`
/// and/or `response` are populated. Fields the model returned that are not
/// named here are preserved verbatim in `extra` so the response still
/// relays the model output faithfully.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    #[serde(default)]
    pub nutrition_label_found: LabelDetection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_grams: Option<serde_json::Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<serde_json::Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturated_fat_grams: Option<serde_json::Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium_mg: Option<serde_json::Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fibre_grams: Option<serde_json::Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sugar_grams: Option<serde_json::Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_grams: Option<serde_json::Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_whole_fruit_or_veg_guess: Option<serde_json::Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guessed_packaged_food_name: Option<String>,
    /// Descriptive message on provider/format failure paths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The raw model text when it could not be parsed as JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Model-returned fields outside the requested schema, relayed verbatim.
    #[serde(flatten, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            nutrition_label_found: LabelDetection::NotFound,
            serving_grams: None,
            calories: None,
            saturated_fat_grams: None,
            sodium_mg: None,
            fibre_grams: None,
            total_sugar_grams: None,
            protein_grams: None,
            percent_whole_fruit_or_veg_guess: None,
            guessed_packaged_food_name: None,
            error: None,
            response: None,
            extra: serde_json::Map::new(),
        }
    }
}

impl AnalysisResult {
    /// Error-shaped result: negative discriminant plus a descriptive message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    /// Fallback for model text that survived fence stripping but is not
    /// valid JSON: the raw text is surfaced to the caller instead of being
    /// treated as a hard failure.
    pub fn unparsed(raw_text: impl Into<String>) -> Self {
        Self {
            response: Some(raw_text.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploaded_image_defaults_mime_type() {
        let img = UploadedImage::new(Bytes::from_static(b"abc"), None);
        assert_eq!(img.mime_type, "image/jpeg");
        let img = UploadedImage::new(Bytes::from_static(b"abc"), Some(String::new()));
        assert_eq!(img.mime_type, "image/jpeg");
        let img = UploadedImage::new(Bytes::from_static(b"abc"), Some("image/png".into()));
        assert_eq!(img.mime_type, "image/png");
    }

    #[test]
    fn test_label_detection_wire_sentinels() {
        assert_eq!(
            serde_json::to_string(&LabelDetection::Found).unwrap(),
            "\"true\""
        );
        assert_eq!(
            serde_json::to_string(&LabelDetection::NotFound).unwrap(),
            "\"false\""
        );
    }

    #[test]
    fn test_label_detection_accepts_strings_and_bools() {
        let found: LabelDetection = serde_json::from_str("\"true\"").unwrap();
        assert_eq!(found, LabelDetection::Found);
        let not_found: LabelDetection = serde_json::from_str("false").unwrap();
        assert_eq!(not_found, LabelDetection::NotFound);
        assert!(serde_json::from_str::<LabelDetection>("\"yes\"").is_err());
    }

    #[test]
    fn test_analysis_result_roundtrip_preserves_extra_fields() {
        let json = r#"{
            "nutrition_label_found": "true",
            "calories": 170,
            "trans_fat_grams": 0.5
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert!(result.nutrition_label_found.is_found());
        assert_eq!(result.calories, Some(serde_json::Number::from(170)));
        assert_eq!(
            result.extra.get("trans_fat_grams"),
            Some(&serde_json::json!(0.5))
        );

        let out = serde_json::to_value(&result).unwrap();
        assert_eq!(out["nutrition_label_found"], "true");
        assert_eq!(out["trans_fat_grams"], serde_json::json!(0.5));
    }

    #[test]
    fn test_failure_result_shape() {
        let result = AnalysisResult::failure("boom");
        let out = serde_json::to_value(&result).unwrap();
        assert_eq!(out["nutrition_label_found"], "false");
        assert_eq!(out["error"], "boom");
        assert!(out.get("calories").is_none());
        assert!(out.get("response").is_none());
    }

    #[test]
    fn test_missing_discriminant_defaults_negative() {
        let result: AnalysisResult = serde_json::from_str("{\"calories\": 5}").unwrap();
        assert_eq!(result.nutrition_label_found, LabelDetection::NotFound);
    }
}
