//! Sign-in and registration page.

use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input, Label};
use ui::use_auth;

use crate::Route;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Login,
    Register,
}

#[component]
pub fn Auth() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    // Signed-in users have no business here.
    use_effect(move || {
        if auth().authenticated {
            nav.replace(Route::Dashboard {});
        }
    });

    let mut tab = use_signal(|| Tab::Login);
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut local_error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);

    let busy = auth().busy;
    let server_error = auth().error;

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        local_error.set(None);
        notice.set(None);
        if username().trim().is_empty() || password().is_empty() {
            local_error.set(Some("Username and password are required.".to_string()));
            return;
        }
        spawn(async move {
            ui::auth::sign_in(auth, username().trim().to_string(), password()).await;
        });
    };

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        local_error.set(None);
        notice.set(None);
        if username().trim().is_empty() {
            local_error.set(Some("Pick a username.".to_string()));
            return;
        }
        if !email().contains('@') {
            local_error.set(Some("Enter a valid email address.".to_string()));
            return;
        }
        if password().len() < 8 {
            local_error.set(Some("Password must be at least 8 characters.".to_string()));
            return;
        }
        spawn(async move {
            let created = ui::auth::register(
                auth,
                email().trim().to_string(),
                password(),
                username().trim().to_string(),
            )
            .await;
            if created {
                password.set(String::new());
                tab.set(Tab::Login);
                notice.set(Some("Account created. Sign in to continue.".to_string()));
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "uply" }

                div {
                    class: "auth-tabs",
                    button {
                        class: if tab() == Tab::Login { "auth-tab auth-tab-active" } else { "auth-tab" },
                        r#type: "button",
                        onclick: move |_| {
                            tab.set(Tab::Login);
                            local_error.set(None);
                        },
                        "Sign in"
                    }
                    button {
                        class: if tab() == Tab::Register { "auth-tab auth-tab-active" } else { "auth-tab" },
                        r#type: "button",
                        onclick: move |_| {
                            tab.set(Tab::Register);
                            local_error.set(None);
                            notice.set(None);
                        },
                        "Create account"
                    }
                }

                if let Some(message) = notice() {
                    p { class: "auth-notice", "{message}" }
                }
                if let Some(message) = local_error() {
                    p { class: "error-text", "{message}" }
                }
                if let Some(message) = server_error {
                    div {
                        class: "auth-error",
                        p { class: "error-text", "{message}" }
                        button {
                            class: "auth-error-dismiss",
                            r#type: "button",
                            onclick: move |_| ui::auth::clear_error(auth),
                            "Dismiss"
                        }
                    }
                }

                if tab() == Tab::Login {
                    form {
                        class: "auth-form",
                        onsubmit: handle_login,
                        div {
                            class: "form-field",
                            Label { html_for: "login-username", "Username or email" }
                            Input {
                                id: "login-username",
                                value: username(),
                                oninput: move |evt: FormEvent| username.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            Label { html_for: "login-password", "Password" }
                            Input {
                                id: "login-password",
                                r#type: "password",
                                value: password(),
                                oninput: move |evt: FormEvent| password.set(evt.value()),
                            }
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            r#type: "submit",
                            disabled: busy,
                            if busy { "Signing in..." } else { "Sign in" }
                        }
                    }
                } else {
                    form {
                        class: "auth-form",
                        onsubmit: handle_register,
                        div {
                            class: "form-field",
                            Label { html_for: "register-username", "Username" }
                            Input {
                                id: "register-username",
                                value: username(),
                                oninput: move |evt: FormEvent| username.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            Label { html_for: "register-email", "Email" }
                            Input {
                                id: "register-email",
                                r#type: "email",
                                value: email(),
                                oninput: move |evt: FormEvent| email.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            Label { html_for: "register-password", "Password" }
                            Input {
                                id: "register-password",
                                r#type: "password",
                                value: password(),
                                oninput: move |evt: FormEvent| password.set(evt.value()),
                            }
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            r#type: "submit",
                            disabled: busy,
                            if busy { "Creating account..." } else { "Create account" }
                        }
                    }
                }
            }
        }
    }
}
