use dioxus::prelude::*;

use ui::AuthProvider;
use views::{Auth, Dashboard, Landing, Profile};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Landing {},
    #[route("/auth")]
    Auth {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/profile")]
    Profile {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        AuthProvider {
            Router::<Route> {}
        }
    }
}
