//! # The gateway seam
//!
//! [`ProfileGateway`] abstracts the backend behind two calls: load the
//! aggregate profile document, save one section wholesale. The `api` crate
//! provides the HTTP implementation; tests drive the controller against an
//! in-memory stub. Every transport failure the implementation can hit must
//! collapse into a [`GatewayError`] — callers never see raw transport
//! errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::SectionKey;

/// The aggregate profile document returned by `getprofile`.
///
/// Kept as raw JSON: sections are pulled out lazily by their document key
/// and parsed against the section schema, so unknown fields added by the
/// backend never break the client.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument(pub Value);

impl ProfileDocument {
    /// The raw value of one section, if the document carries it.
    pub fn section(&self, key: SectionKey) -> Option<&Value> {
        self.0.get(key.document_key())
    }
}

/// Uniform error shape at the gateway boundary.
///
/// This is the sole error-translation point: network failures become a
/// generic message, backend-reported errors keep their message verbatim,
/// and undecodable bodies get their own variant. All are recoverable by the
/// user re-attempting the action.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response (network failure, timeout).
    #[error("An unexpected error occurred. Please try again.")]
    Unreachable,
    /// The backend answered with a non-2xx status; the message comes from
    /// the response body's `detail`/`error` field.
    #[error("{0}")]
    Rejected(String),
    /// A 2xx response whose body could not be decoded.
    #[error("Received an invalid response from the server.")]
    Malformed,
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Backend access for profile data.
pub trait ProfileGateway {
    fn load_profile(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = GatewayResult<ProfileDocument>>;
    fn save_section(
        &self,
        user_id: &str,
        key: SectionKey,
        payload: Value,
    ) -> impl std::future::Future<Output = GatewayResult<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_read_by_document_key() {
        let doc = ProfileDocument(serde_json::json!({
            "personalInfo": { "firstName": "Ada" },
            "workEx": [],
        }));
        assert!(doc.section(SectionKey::PersonalInfo).is_some());
        assert!(doc.section(SectionKey::WorkExperience).is_some());
        assert!(doc.section(SectionKey::Achievements).is_none());
    }

    #[test]
    fn rejected_errors_surface_the_backend_message_verbatim() {
        let err = GatewayError::Rejected("Invalid username or password".to_string());
        assert_eq!(err.to_string(), "Invalid username or password");
        assert_eq!(
            GatewayError::Unreachable.to_string(),
            "An unexpected error occurred. Please try again."
        );
    }
}
