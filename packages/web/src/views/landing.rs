//! Public landing page.

use dioxus::prelude::*;
use ui::use_auth;

use crate::Route;

#[component]
pub fn Landing() -> Element {
    let auth = use_auth();
    let signed_in = auth().authenticated;

    rsx! {
        div {
            class: "landing",
            div {
                class: "landing-hero",
                h1 { "uply" }
                p {
                    class: "landing-tagline",
                    "One profile, every application. Keep your education, projects, and experience in one place and let it work for you."
                }
                div {
                    class: "landing-actions",
                    if signed_in {
                        Link { class: "btn btn-primary", to: Route::Dashboard {}, "Go to dashboard" }
                    } else {
                        Link { class: "btn btn-primary", to: Route::Auth {}, "Get started" }
                        Link { class: "btn btn-outline", to: Route::Auth {}, "Sign in" }
                    }
                }
            }
            div {
                class: "landing-features",
                div {
                    class: "feature-card",
                    h3 { "Structured profile" }
                    p { "Education, projects, skills, experience, certifications and more, each in its own section." }
                }
                div {
                    class: "feature-card",
                    h3 { "Save as you go" }
                    p { "Every section is saved independently. Come back any time and pick up where you left off." }
                }
                div {
                    class: "feature-card",
                    h3 { "Ready to share" }
                    p { "Attach your resume and social links so applications start from a complete picture." }
                }
            }
        }
    }
}
