//! Application root.

use dioxus::prelude::*;

use crate::auth_session::AuthProvider;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Title { "Opsboard" }
        script { src: "https://cdn.tailwindcss.com" }

        AuthProvider {
            Router::<Route> {}
        }
    }
}
