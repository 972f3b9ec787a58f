use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD as B64;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use std::error::Error;
use thiserror::Error;

pub type FxError = Box<dyn Error + Send + Sync>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    #[error("build url error: {0}")]
    BuildUrl(#[from] url::ParseError),

    #[error("transport: {0}")]
    Transport(#[from] crate::transport::TransportError),

    /// Non-2xx response, flattened to the backend's diagnostic text.
    /// Callers that need the status must check it before the pipeline runs;
    /// it is not carried here.
    #[error("{message}")]
    Status { message: String },

    #[error("decode error: {source}")]
    Decode { source: FxError, body: String },

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("no content in response to {path}")]
    UnexpectedNoContent { path: String },
}

/// Diagnostic text for a non-2xx response.
///
/// The backend optionally ships a JSON object with `message` and/or
/// `detail` string fields; first non-empty one wins, `message` before
/// `detail`. Anything else (unparseable body, neither field, empty
/// strings) falls back to a generated text carrying the status code.
pub(crate) fn diagnostic_message(status: StatusCode, body: &Bytes) -> String {
    match structured_error_text(body) {
        Some(text) => text,
        None => format!("Request error ({})", status.as_u16()),
    }
}

// Fallible probe; `None` means "no structured error body available",
// including bodies that are not JSON at all.
fn structured_error_text(body: &Bytes) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "detail"].iter().find_map(|key| {
        value
            .get(key)
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    })
}

pub fn body_as_text(headers: &HeaderMap, body: &Bytes) -> String {
    const MAX: usize = 8 * 1024;
    let ct = headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let slice = if body.len() > MAX {
        &body[..MAX]
    } else {
        &body[..]
    };

    if ct.starts_with("application/json") || ct.starts_with("text/") {
        match std::str::from_utf8(slice) {
            Ok(s) => s.to_owned(),
            Err(_) => format!("<non-utf8-text; {} bytes>", slice.len()),
        }
    } else {
        let b64 = B64.encode(slice);
        format!(
            "<non-text; {} bytes; base64:{}{}>",
            body.len(),
            &b64[..b64.len().min(1024)],
            if b64.len() > 1024 { "..." } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    #[test]
    fn message_field_wins() {
        let text = diagnostic_message(
            StatusCode::BAD_REQUEST,
            &bytes(r#"{"message":"City is required","detail":"ignored"}"#),
        );
        assert_eq!(text, "City is required");
    }

    #[test]
    fn detail_used_when_message_absent() {
        let text = diagnostic_message(StatusCode::NOT_FOUND, &bytes(r#"{"detail":"Fund not found"}"#));
        assert_eq!(text, "Fund not found");
    }

    #[test]
    fn empty_message_falls_through_to_detail() {
        let text = diagnostic_message(
            StatusCode::NOT_FOUND,
            &bytes(r#"{"message":"","detail":"Fund not found"}"#),
        );
        assert_eq!(text, "Fund not found");
    }

    #[test]
    fn non_string_message_falls_through_to_detail() {
        let text = diagnostic_message(
            StatusCode::UNPROCESSABLE_ENTITY,
            &bytes(r#"{"message":42,"detail":"Invalid payload"}"#),
        );
        assert_eq!(text, "Invalid payload");
    }

    #[test]
    fn unparseable_body_uses_generated_text() {
        let text = diagnostic_message(StatusCode::INTERNAL_SERVER_ERROR, &bytes("<html>oops</html>"));
        assert_eq!(text, "Request error (500)");
    }

    #[test]
    fn empty_body_uses_generated_text() {
        let text = diagnostic_message(StatusCode::BAD_GATEWAY, &Bytes::new());
        assert_eq!(text, "Request error (502)");
    }

    #[test]
    fn json_without_known_fields_uses_generated_text() {
        let text = diagnostic_message(StatusCode::CONFLICT, &bytes(r#"{"error":"nope"}"#));
        assert_eq!(text, "Request error (409)");
    }

    #[test]
    fn status_error_displays_message_only() {
        let err = ApiError::Status {
            message: "Fund not found".to_string(),
        };
        assert_eq!(err.to_string(), "Fund not found");
    }
}
