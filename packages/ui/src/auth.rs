//! Authentication context and hooks for the UI.

use dioxus::prelude::*;
use profile::Session;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    /// An auth action (login, register, logout) is in flight.
    pub busy: bool,
    /// Message from the last failed auth action, shown until the next
    /// attempt or an explicit dismiss.
    pub error: Option<String>,
    pub authenticated: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            busy: false,
            error: None,
            authenticated: false,
        }
    }
}

impl AuthState {
    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id.as_str())
    }

    /// API client carrying this session's bearer token, if any.
    pub fn client(&self) -> api::Client {
        api::Client::new(api::default_base_url())
            .with_token(self.session.as_ref().map(|s| s.token.clone()))
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let auth_state = use_signal(|| {
        // Restore the persisted session before the first render so route
        // guards never see a transient signed-out state.
        match crate::storage::load_stored_auth() {
            Some(stored) if stored.is_authenticated && stored.user.is_some() => AuthState {
                session: stored.user,
                busy: false,
                error: None,
                authenticated: true,
            },
            _ => AuthState::default(),
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Log in with username/email and password. On success the session is
/// persisted and the state flips to authenticated.
pub async fn sign_in(mut auth: Signal<AuthState>, username: String, password: String) {
    if !begin_action(&mut auth) {
        return;
    }
    let client = api::Client::new(api::default_base_url());
    match client.login(&username, &password).await {
        Ok(session) => finish_login(&mut auth, session),
        Err(err) => fail_action(&mut auth, err.to_string()),
    }
}

/// Register a new account. Returns `true` on success; the caller sends the
/// user to the login form, no session is established here.
pub async fn register(
    mut auth: Signal<AuthState>,
    email: String,
    password: String,
    username: String,
) -> bool {
    if !begin_action(&mut auth) {
        return false;
    }
    let client = api::Client::new(api::default_base_url());
    match client.signup(&email, &password, &username).await {
        Ok(()) => {
            auth.write().busy = false;
            true
        }
        Err(err) => {
            fail_action(&mut auth, err.to_string());
            false
        }
    }
}

/// Exchange a Google ID token for a session.
///
/// Token acquisition is the host page's concern (the Google Identity
/// Services script); no shipped view wires this up yet, so the auth page
/// only offers username/password sign-in for now.
pub async fn sign_in_with_google(mut auth: Signal<AuthState>, id_token: String) {
    if !begin_action(&mut auth) {
        return;
    }
    let client = api::Client::new(api::default_base_url());
    match client.login_google(&id_token).await {
        Ok(session) => finish_login(&mut auth, session),
        Err(err) => fail_action(&mut auth, err.to_string()),
    }
}

/// Log out. Server-side revocation is best-effort; local state and the
/// persisted session are always cleared.
pub async fn sign_out(mut auth: Signal<AuthState>) {
    let token = auth
        .peek()
        .session
        .as_ref()
        .map(|s| s.token.clone())
        .filter(|t| !t.is_empty());
    if let Some(token) = token {
        let client = auth.peek().client();
        if let Err(err) = client.logout(&token).await {
            tracing::warn!("logout revocation failed, clearing local session anyway: {err}");
        }
    }
    crate::storage::clear_stored_auth();
    auth.set(AuthState::default());
}

/// Dismiss the current auth error banner.
pub fn clear_error(mut auth: Signal<AuthState>) {
    auth.write().error = None;
}

fn begin_action(auth: &mut Signal<AuthState>) -> bool {
    if auth.peek().busy {
        return false;
    }
    let mut state = auth.write();
    state.busy = true;
    state.error = None;
    true
}

fn finish_login(auth: &mut Signal<AuthState>, session: Session) {
    crate::storage::persist_auth(Some(&session), true);
    auth.set(AuthState {
        session: Some(session),
        busy: false,
        error: None,
        authenticated: true,
    });
}

fn fail_action(auth: &mut Signal<AuthState>, message: String) {
    tracing::error!("auth action failed: {message}");
    let mut state = auth.write();
    state.busy = false;
    state.error = Some(message);
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth_state = use_auth();

    let onclick = move |_| async move {
        sign_out(auth_state).await;
        // Back to the landing page
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/");
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
