//! Signed-in home page.

use dioxus::prelude::*;
use ui::{use_auth, Navbar};

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        if !auth().authenticated {
            nav.replace(Route::Auth {});
        }
    });

    let username = auth()
        .session
        .map(|s| s.username)
        .unwrap_or_default();

    rsx! {
        Navbar {
            Link { class: "navbar-link", to: Route::Dashboard {}, "Dashboard" }
            Link { class: "navbar-link", to: Route::Profile {}, "Profile" }
        }
        div {
            class: "dashboard",
            h1 { "Welcome back, {username}" }
            div {
                class: "dashboard-cards",
                div {
                    class: "dashboard-card",
                    h3 { "Your profile" }
                    p { "A complete profile gets better matches. Review your sections and keep them current." }
                    Link { class: "btn btn-primary", to: Route::Profile {}, "Edit profile" }
                }
            }
        }
    }
}
