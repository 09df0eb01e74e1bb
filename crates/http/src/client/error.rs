//! Client error types

use serde_json::Value as JsonValue;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure before a response arrived
    #[error("Network request failed, check your connection and try again")]
    Request(#[from] reqwest::Error),

    /// An authenticated request was rejected with 401. A page reload has
    /// already been triggered.
    #[error("Your session has expired")]
    SessionExpired,

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Credentials rejected on a public endpoint
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body failed server-side validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code and raw response body
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| status.to_string(), str::to_string)
        });

        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            422 => Self::Validation(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the error means the session is gone and the page is reloading
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// HTTP status, when the error came from a response
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::SessionExpired | Self::AuthenticationFailed(_) => Some(401),
            Self::BadRequest(_) => Some(400),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(422),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(_) | Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }
}

/// Best-effort extraction of a human readable message from an error body.
///
/// Understands `{"message": ..}`, `{"error": ..}` (string or nested object
/// with a message), `{"detail": ..}` and `{"errors": [..]}`. Falls back to the
/// raw body when it is short plain text.
fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(json) = serde_json::from_str::<JsonValue>(body) else {
        return (body.len() <= 200 && !body.starts_with('<')).then(|| body.to_string());
    };

    let field = |value: &JsonValue, name: &str| -> Option<String> {
        match value.get(name)? {
            JsonValue::String(text) => Some(text.clone()),
            nested @ JsonValue::Object(_) => nested
                .get("message")
                .and_then(JsonValue::as_str)
                .map(str::to_string),
            JsonValue::Array(items) => {
                let joined = items
                    .iter()
                    .filter_map(|item| {
                        item.as_str()
                            .or_else(|| item.get("message").and_then(JsonValue::as_str))
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                (!joined.is_empty()).then_some(joined)
            }
            _ => None,
        }
    };

    ["message", "error", "detail", "errors"]
        .iter()
        .find_map(|name| field(&json, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_extracts_message_field() {
        let error = ClientError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Email is already registered"}"#,
        );
        assert!(matches!(error, ClientError::BadRequest(ref m) if m == "Email is already registered"));
    }

    #[test]
    fn test_extracts_nested_error_object() {
        let error = ClientError::from_status(
            StatusCode::FORBIDDEN,
            r#"{"error":{"code":"E42","message":"Not your application"}}"#,
        );
        assert!(matches!(error, ClientError::Forbidden(ref m) if m == "Not your application"));
    }

    #[test]
    fn test_joins_error_list() {
        let error = ClientError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"errors":[{"message":"program is required"},"intake is invalid"]}"#,
        );
        assert!(
            matches!(error, ClientError::Validation(ref m) if m == "program is required; intake is invalid")
        );
    }

    #[test]
    fn test_falls_back_to_status_reason() {
        let error = ClientError::from_status(StatusCode::SERVICE_UNAVAILABLE, "");
        assert!(matches!(
            error,
            ClientError::ServerError { status: 503, ref message } if message == "Service Unavailable"
        ));

        let html = ClientError::from_status(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert!(matches!(
            html,
            ClientError::ServerError { status: 502, ref message } if message == "Bad Gateway"
        ));
    }

    #[test]
    fn test_plain_text_body_is_kept() {
        let error = ClientError::from_status(StatusCode::NOT_FOUND, "no such student");
        assert!(matches!(error, ClientError::NotFound(ref m) if m == "no such student"));
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_only_session_expired_counts_as_auth_expired() {
        assert!(ClientError::SessionExpired.is_auth_expired());
        assert!(!ClientError::AuthenticationFailed("bad password".into()).is_auth_expired());
    }
}
