//! The authenticated user identity.

use serde::{Deserialize, Serialize};

/// Identity and bearer token for the signed-in user.
///
/// Created by the auth endpoints on successful login or registration, held in
/// app-wide state, and persisted (partially) to local storage so a reload
/// does not sign the user out. Exactly one session is active at a time;
/// absence of a session means unauthenticated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub email: String,
    /// Bearer token for profile calls. May be empty for sessions restored
    /// from older storage payloads.
    #[serde(default)]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl Session {
    /// Token to attach as `Authorization: Bearer ...`, if any.
    pub fn bearer(&self) -> Option<&str> {
        if self.token.is_empty() {
            None
        } else {
            Some(self.token.as_str())
        }
    }
}
