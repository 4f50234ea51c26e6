use dioxus::prelude::*;

use crate::{use_auth, LogoutButton};

/// Top navigation bar. Shows the signed-in username and a logout action
/// when a session is present; otherwise only the brand mark.
#[component]
pub fn Navbar(children: Element) -> Element {
    let auth = use_auth();
    let username = auth().session.map(|s| s.username);

    rsx! {
        div {
            class: "navbar",
            a { class: "navbar-brand", href: "/", "uply" }
            div {
                class: "navbar-links",
                {children}
            }
            div {
                class: "navbar-session",
                if let Some(name) = username {
                    span { class: "navbar-user", "{name}" }
                    LogoutButton { class: "btn btn-ghost" }
                }
            }
        }
    }
}
