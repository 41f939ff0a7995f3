//! Integration tests for the Gemini backend over a mocked provider.
//!
//! Verifies the request wire format (path, API key header, inline image
//! data) and that provider failures surface as errors rather than panics.

use bytes::Bytes;
use nutriscan_core::{Error, UploadedImage};
use nutriscan_inference::{GeminiBackend, GeminiConfig, VisionBackend};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: String) -> GeminiConfig {
    GeminiConfig {
        base_url,
        api_key: "test-key".to_string(),
        model: "gemini-2.0-flash-lite".to_string(),
        timeout_seconds: 5,
    }
}

fn rest_envelope(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": text}]
            },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_analyze_image_sends_key_model_path_and_inline_data() {
    let mock_server = MockServer::start().await;

    // "jpeg bytes" base64-encoded
    let expected_body = serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": [
                {"text": "What is on this label?"},
                {"inlineData": {"mimeType": "image/jpeg", "data": "anBlZyBieXRlcw=="}}
            ]
        }]
    });

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash-lite:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(rest_envelope("label text")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = GeminiBackend::new(test_config(mock_server.uri())).unwrap();
    let image = UploadedImage::new(Bytes::from_static(b"jpeg bytes"), Some("image/jpeg".into()));

    let reply = backend
        .analyze_image(&image, "What is on this label?")
        .await
        .unwrap();
    assert_eq!(reply, "label text");
}

#[tokio::test]
async fn test_generate_text_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash-lite:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rest_envelope("because physics")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = GeminiBackend::new(test_config(mock_server.uri())).unwrap();
    let reply = backend.generate_text("Why is the sky blue?").await.unwrap();
    assert_eq!(reply, "because physics");
}

#[tokio::test]
async fn test_provider_error_status_surfaces_as_inference_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429).set_body_string("{\"error\": \"quota exceeded\"}"),
        )
        .mount(&mock_server)
        .await;

    let backend = GeminiBackend::new(test_config(mock_server.uri())).unwrap();
    let image = UploadedImage::new(Bytes::from_static(b"x"), None);

    let err = backend.analyze_image(&image, "prompt").await.unwrap_err();
    match err {
        Error::Inference(msg) => {
            assert!(msg.contains("429"), "message should carry status: {}", msg)
        }
        other => panic!("expected Inference error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unrecognized_envelope_is_response_format_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"promptFeedback": {"blockReason": "SAFETY"}})),
        )
        .mount(&mock_server)
        .await;

    let backend = GeminiBackend::new(test_config(mock_server.uri())).unwrap();
    let image = UploadedImage::new(Bytes::from_static(b"x"), None);

    let err = backend.analyze_image(&image, "prompt").await.unwrap_err();
    assert!(matches!(err, Error::ResponseFormat(_)));
}

#[tokio::test]
async fn test_timeout_surfaces_as_request_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(rest_envelope("late"))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = test_config(mock_server.uri());
    config.timeout_seconds = 1;
    let backend = GeminiBackend::new(config).unwrap();
    let image = UploadedImage::new(Bytes::from_static(b"x"), None);

    let err = backend.analyze_image(&image, "prompt").await.unwrap_err();
    assert!(matches!(err, Error::Request(_)));
}
