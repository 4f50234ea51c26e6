//! # API crate — the HTTP profile gateway
//!
//! [`Client`] wraps every outbound call to the backend: it owns the base
//! URL, attaches the session's bearer token when one is present (and simply
//! omits it otherwise — unauthenticated calls are expected to fail
//! backend-side, never client-side), and normalizes all transport failures
//! into [`ApiError`] at a single boundary.
//!
//! ## Endpoints
//!
//! | Call | Route |
//! |------|-------|
//! | [`Client::login`] | `POST /auth/login` |
//! | [`Client::signup`] | `POST /auth/signup` |
//! | [`Client::login_google`] | `POST /auth/google` |
//! | [`Client::logout`] | `POST /auth/logout` |
//! | [`Client::fetch_profile`] | `GET /profile/{userId}/getprofile` |
//! | [`Client::update_section`] | `POST /profile/{userId}/{section}` |
//!
//! `Client` also implements [`profile::ProfileGateway`], which is how the
//! section form controller reaches it.

use serde::Deserialize;
use serde_json::{json, Value};

use profile::{GatewayResult, ProfileDocument, ProfileGateway, SectionKey, Session};

mod error;
pub use error::ApiError;

/// Base URL used when none is configured at build time.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Backend base URL: the `UPLY_API_BASE_URL` compile-time override, or the
/// local default.
pub fn default_base_url() -> String {
    option_env!("UPLY_API_BASE_URL")
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}

/// Authenticated HTTP client for the uply backend.
#[derive(Clone, Debug)]
pub struct Client {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

/// Success envelope for the auth endpoints: `{ message, data }`.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    #[allow(dead_code)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Session>,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    /// Attach the session's bearer token to subsequent requests.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.get(self.url(path)))
    }

    fn post(&self, path: &str, body: &Value) -> reqwest::RequestBuilder {
        self.authorize(self.http.post(self.url(path)).json(body))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and translate failures. 2xx responses pass through.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = builder.send().await.map_err(|err| {
            tracing::error!("request failed to reach the backend: {err}");
            ApiError::Transport(err)
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error::extract_error_message(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), "backend rejected request: {message}");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn session_from(&self, builder: reqwest::RequestBuilder) -> Result<Session, ApiError> {
        let response = self.send(builder).await?;
        let envelope: AuthResponse = response.json().await.map_err(ApiError::Decode)?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// Log in with username/email and password.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let body = json!({ "username": username, "password": password });
        self.session_from(self.post("auth/login", &body)).await
    }

    /// Register a new account. The user signs in afterwards; no session is
    /// established here.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<(), ApiError> {
        let body = json!({ "email": email, "password": password, "username": username });
        self.send(self.post("auth/signup", &body)).await?;
        Ok(())
    }

    /// Exchange a Google ID token for a session.
    ///
    /// The token must already have been obtained from the Google Identity
    /// Services script by the host page; no view currently calls this.
    pub async fn login_google(&self, id_token: &str) -> Result<Session, ApiError> {
        let body = json!({ "idToken": id_token });
        self.session_from(self.post("auth/google", &body)).await
    }

    /// Revoke the session token. Callers treat this as best-effort and clear
    /// local state regardless of the outcome.
    pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let body = json!({ "idToken": token });
        self.send(self.post("auth/logout", &body)).await?;
        Ok(())
    }

    /// Fetch the aggregate profile document for a user.
    pub async fn fetch_profile(&self, user_id: &str) -> Result<ProfileDocument, ApiError> {
        let response = self.send(self.get(&format!("profile/{user_id}/getprofile"))).await?;
        let document: Value = response.json().await.map_err(ApiError::Decode)?;
        Ok(ProfileDocument(document))
    }

    /// Replace one profile section wholesale.
    pub async fn update_section(
        &self,
        user_id: &str,
        key: SectionKey,
        payload: Value,
    ) -> Result<(), ApiError> {
        let path = format!("profile/{user_id}/{}", key.endpoint());
        self.send(self.post(&path, &payload)).await?;
        Ok(())
    }
}

impl ProfileGateway for Client {
    async fn load_profile(&self, user_id: &str) -> GatewayResult<ProfileDocument> {
        self.fetch_profile(user_id).await.map_err(Into::into)
    }

    async fn save_section(
        &self,
        user_id: &str,
        key: SectionKey,
        payload: Value,
    ) -> GatewayResult<()> {
        self.update_section(user_id, key, payload)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_doubled_slashes() {
        let client = Client::new("http://localhost:8000/api/");
        assert_eq!(
            client.url("/profile/u1/getprofile"),
            "http://localhost:8000/api/profile/u1/getprofile"
        );
        assert_eq!(client.url("auth/login"), "http://localhost:8000/api/auth/login");
    }

    #[test]
    fn empty_tokens_are_never_attached() {
        let client = Client::new(DEFAULT_BASE_URL).with_token(Some(String::new()));
        assert!(client.token.is_none());
        let client = client.with_token(Some("t0k".to_string()));
        assert_eq!(client.token.as_deref(), Some("t0k"));
    }

    #[test]
    fn auth_envelope_decodes_the_session() {
        let envelope: AuthResponse = serde_json::from_str(
            r#"{"message":"Login successful","data":{"userId":"u1","username":"ada","email":"a@b.co","token":"t0k"}}"#,
        )
        .unwrap();
        let session = envelope.data.unwrap();
        assert_eq!(session.user_id, "u1");
        assert_eq!(session.bearer(), Some("t0k"));
    }

    #[test]
    fn section_endpoints_match_the_backend_routes() {
        // The write path is derived from the section key, not hand-built at
        // call sites.
        assert_eq!(
            format!("profile/u1/{}", SectionKey::Skills.endpoint()),
            "profile/u1/skill_info"
        );
        assert_eq!(
            format!("profile/u1/{}", SectionKey::Socials.endpoint()),
            "profile/u1/socials"
        );
    }
}
