//! Transport-error translation.
//!
//! This is the only place raw `reqwest` errors and backend error bodies are
//! handled. Everything above sees [`ApiError`], or its [`GatewayError`]
//! projection when going through the gateway trait.

use profile::GatewayError;

/// Error returned by every [`crate::Client`] call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("An unexpected error occurred. Please try again.")]
    Transport(#[source] reqwest::Error),
    /// Non-2xx response; `message` carries the backend's `detail`/`error`
    /// field verbatim when present.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// A 2xx response whose body could not be decoded.
    #[error("Received an invalid response from the server.")]
    Decode(#[source] reqwest::Error),
    /// A 2xx response missing the expected payload.
    #[error("Received an invalid response from the server.")]
    MissingData,
}

impl From<ApiError> for GatewayError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(_) => GatewayError::Unreachable,
            ApiError::Status { message, .. } => GatewayError::Rejected(message),
            ApiError::Decode(_) | ApiError::MissingData => GatewayError::Malformed,
        }
    }
}

/// Pull the human-readable message out of a backend error body.
///
/// The backend answers failures with `{"detail": "..."}` (FastAPI style) or
/// `{"error": "..."}`; anything else falls back to a status line.
pub(crate) fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    format!("Request failed with status {status}.")
}
