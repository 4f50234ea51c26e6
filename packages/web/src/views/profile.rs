//! The profile editor: nine sections behind one tab strip.
//!
//! Each tab mounts a `SectionForm` keyed by section so switching tabs
//! rebuilds the form state from scratch. Saving a section advances to the
//! next one, wizard-style, until the last.

use dioxus::prelude::*;
use profile::SectionKey;
use ui::{use_auth, Navbar, SectionForm};

use crate::Route;

#[component]
pub fn Profile() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        if !auth().authenticated {
            nav.replace(Route::Auth {});
        }
    });

    let mut active = use_signal(|| 0usize);
    let section = SectionKey::ALL[active()];

    rsx! {
        Navbar {
            Link { class: "navbar-link", to: Route::Dashboard {}, "Dashboard" }
            Link { class: "navbar-link", to: Route::Profile {}, "Profile" }
        }
        div {
            class: "profile-page",
            nav {
                class: "profile-tabs",
                for (index, key) in SectionKey::ALL.iter().enumerate() {
                    button {
                        key: "{key.endpoint()}",
                        class: if index == active() { "profile-tab profile-tab-active" } else { "profile-tab" },
                        r#type: "button",
                        onclick: move |_| active.set(index),
                        "{key.title()}"
                    }
                }
            }
            div {
                class: "profile-content",
                SectionForm {
                    key: "{section.endpoint()}",
                    section: section,
                    on_complete: move |_| {
                        let next = active() + 1;
                        if next < SectionKey::ALL.len() {
                            active.set(next);
                        }
                    },
                }
            }
        }
    }
}
