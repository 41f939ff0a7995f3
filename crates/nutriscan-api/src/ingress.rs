//! Ingress normalization: reduce an inbound HTTP request to a single
//! `(bytes, mime type)` pair regardless of how the image arrived.
//!
//! Two arrival modes are supported, probed in order:
//!
//! 1. Raw binary body whose declared content-type starts with `image/` —
//!    the whole body is the image, mime type taken verbatim.
//! 2. `multipart/form-data` containing a file part — first part with a
//!    filename wins, mime type from the part (defaulting to JPEG).
//!
//! The upload ceiling is enforced on both paths before any model call.

use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{header, StatusCode};

use nutriscan_core::{logging, Error, Result, UploadedImage};

/// Normalize a request into an [`UploadedImage`], enforcing `limit` as the
/// maximum accepted payload size.
pub async fn normalize(request: Request, limit: usize) -> Result<UploadedImage> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    // Raw binary upload: the body is the image.
    if let Some(ct) = content_type.filter(|ct| ct.starts_with("image/")) {
        // to_bytes fails once the body outgrows `limit`; a mid-read client
        // disconnect lands on the same path, which is acceptable since the
        // caller gets a definitive rejection either way.
        let bytes = axum::body::to_bytes(request.into_body(), limit)
            .await
            .map_err(|_| Error::PayloadTooLarge(limit))?;
        if bytes.is_empty() {
            return Err(Error::EmptyPayload);
        }
        tracing::debug!(
            { logging::SUBSYSTEM } = "api",
            { logging::OPERATION } = "normalize",
            { logging::IMAGE_BYTES } = bytes.len(),
            { logging::MIME_TYPE } = %ct,
            "Accepted raw binary upload"
        );
        return Ok(UploadedImage::new(bytes, Some(ct)));
    }

    // Multipart upload: take the first file part.
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|_| Error::EmptyPayload)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.file_name().is_none() {
            continue;
        }
        let mime_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        if bytes.len() > limit {
            return Err(Error::PayloadTooLarge(limit));
        }
        if bytes.is_empty() {
            return Err(Error::EmptyPayload);
        }
        tracing::debug!(
            { logging::SUBSYSTEM } = "api",
            { logging::OPERATION } = "normalize",
            { logging::IMAGE_BYTES } = bytes.len(),
            "Accepted multipart upload"
        );
        return Ok(UploadedImage::new(bytes, mime_type));
    }

    Err(Error::NoFileUploaded)
}

fn multipart_error(err: MultipartError, limit: usize) -> Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge(limit)
    } else {
        Error::InvalidInput(format!("malformed multipart body: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    fn raw_request(content_type: &str, body: &'static [u8]) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/analyze")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request {
        let boundary = "----NutriscanTestBoundary";
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
            match filename {
                Some(fname) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: image/jpeg\r\n\r\n",
                        name, fname
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

        HttpRequest::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_raw_body_taken_verbatim_with_header_mime() {
        let image = normalize(raw_request("image/png", b"png bytes"), 1024)
            .await
            .unwrap();
        assert_eq!(&image.bytes[..], b"png bytes");
        assert_eq!(image.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_raw_body_over_limit_is_payload_too_large() {
        let err = normalize(raw_request("image/jpeg", &[0u8; 64]), 16)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::PayloadTooLarge(16)));
    }

    #[tokio::test]
    async fn test_empty_raw_body_is_empty_payload() {
        let err = normalize(raw_request("image/jpeg", b""), 1024)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyPayload));
    }

    #[tokio::test]
    async fn test_multipart_file_part_extracted() {
        let req = multipart_request(&[
            ("note", None, b"not a file"),
            ("file", Some("label.jpg"), b"jpeg data"),
        ]);
        let image = normalize(req, 1024).await.unwrap();
        assert_eq!(&image.bytes[..], b"jpeg data");
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_multipart_without_file_part_is_no_file_uploaded() {
        let req = multipart_request(&[("note", None, b"just text")]);
        let err = normalize(req, 1024).await.unwrap_err();
        assert!(matches!(err, Error::NoFileUploaded));
    }

    #[tokio::test]
    async fn test_multipart_file_over_limit_is_payload_too_large() {
        let big = vec![0u8; 64];
        let req = multipart_request(&[("file", Some("big.jpg"), &big)]);
        let err = normalize(req, 16).await.unwrap_err();
        assert!(matches!(err, Error::PayloadTooLarge(16)));
    }

    #[tokio::test]
    async fn test_non_image_non_multipart_is_empty_payload() {
        let req = HttpRequest::builder()
            .method("POST")
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let err = normalize(req, 1024).await.unwrap_err();
        assert!(matches!(err, Error::EmptyPayload));
    }
}
