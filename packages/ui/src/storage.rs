//! Session persistence across page reloads.
//!
//! On the web the session lives in `localStorage` under [`STORAGE_KEY`];
//! everywhere else these are no-ops and every launch starts signed out.

use profile::Session;
use serde::{Deserialize, Serialize};

/// `localStorage` key holding the persisted session.
pub const STORAGE_KEY: &str = "uply-auth-storage";

/// The slice of auth state that survives a reload. Transient flags like
/// in-flight markers and error banners are deliberately not part of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAuth {
    pub user: Option<Session>,
    #[serde(default)]
    pub is_authenticated: bool,
}

/// Read the persisted session, if any. A corrupt entry reads as absent.
pub fn load_stored_auth() -> Option<StoredAuth> {
    let raw = read_raw()?;
    match serde_json::from_str(&raw) {
        Ok(stored) => Some(stored),
        Err(err) => {
            tracing::warn!("discarding unreadable stored session: {err}");
            None
        }
    }
}

/// Persist the current session.
pub fn persist_auth(user: Option<&Session>, is_authenticated: bool) {
    let stored = StoredAuth {
        user: user.cloned(),
        is_authenticated,
    };
    if let Ok(raw) = serde_json::to_string(&stored) {
        write_raw(&raw);
    }
}

/// Drop the persisted session.
pub fn clear_stored_auth() {
    remove_raw();
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn read_raw() -> Option<String> {
    local_storage()?.get_item(STORAGE_KEY).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn write_raw(raw: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(STORAGE_KEY, raw);
    }
}

#[cfg(target_arch = "wasm32")]
fn remove_raw() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_raw() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn write_raw(_raw: &str) {}

#[cfg(not(target_arch = "wasm32"))]
fn remove_raw() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_auth_uses_camel_case_keys() {
        let stored = StoredAuth {
            user: Some(Session {
                user_id: "u1".to_string(),
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
                token: "t0k".to_string(),
                picture: None,
            }),
            is_authenticated: true,
        };
        let raw = serde_json::to_string(&stored).unwrap();
        assert!(raw.contains("\"isAuthenticated\":true"));
        assert!(raw.contains("\"userId\":\"u1\""));

        let back: StoredAuth = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, stored);
    }

    #[test]
    fn missing_flags_read_as_signed_out() {
        let stored: StoredAuth = serde_json::from_str(r#"{"user":null}"#).unwrap();
        assert!(!stored.is_authenticated);
        assert!(stored.user.is_none());
    }
}
