//! Error types for the remote API layer.

use thiserror::Error;

/// Shown when neither the server nor the transport gave us anything useful.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Errors that can occur during a round trip to the remote API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (unreachable host, timeout, TLS).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("Remote error (HTTP {status})")]
    Remote { status: u16, message: Option<String> },

    /// The server answered successfully but had nothing for us.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Normalized, user-facing description of the failure.
    ///
    /// Prefers the server's own message, then the transport's, then a generic
    /// fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Remote {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.trim().to_string(),
            ApiError::Transport(message) | ApiError::NotFound(message)
                if !message.trim().is_empty() =>
            {
                message.trim().to_string()
            }
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_) | ApiError::Remote { status: 404, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Transport("The server took too long to respond".to_string())
        } else if e.is_connect() {
            ApiError::Transport("Unable to reach the server".to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Pulls a human-readable message out of an error response body.
///
/// Servers answer with `{"message": ...}`, `{"Message": ...}`, a bare JSON
/// string or plain text depending on the endpoint. HTML error pages are
/// ignored.
pub fn extract_remote_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["message", "Message", "error", "title", "detail"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        Ok(serde_json::Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Ok(_) => None,
        Err(_) if trimmed.len() <= 200 => Some(trimmed.to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_preferred() {
        let err = ApiError::Remote {
            status: 400,
            message: Some("Brand name already exists".into()),
        };
        assert_eq!(err.user_message(), "Brand name already exists");
    }

    #[test]
    fn test_falls_back_to_transport_then_generic() {
        assert_eq!(
            ApiError::Transport("Unable to reach the server".into()).user_message(),
            "Unable to reach the server"
        );
        assert_eq!(
            ApiError::Remote {
                status: 500,
                message: None
            }
            .user_message(),
            GENERIC_FAILURE
        );
        assert_eq!(ApiError::Decode("eof".into()).user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_extract_remote_message_shapes() {
        assert_eq!(
            extract_remote_message(r#"{"Message":"Invalid credentials"}"#),
            Some("Invalid credentials".into())
        );
        assert_eq!(
            extract_remote_message(r#""Cart is empty""#),
            Some("Cart is empty".into())
        );
        assert_eq!(
            extract_remote_message("Order not found"),
            Some("Order not found".into())
        );
        assert_eq!(extract_remote_message("<html>502</html>"), None);
        assert_eq!(extract_remote_message(r#"{"status":500}"#), None);
        assert_eq!(extract_remote_message("   "), None);
    }
}
