//! Landing page: sends everyone into the board and lets the gate sort out
//! who may actually see it.

use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn Home() -> Element {
    let nav = use_navigator();

    use_effect(move || {
        nav.replace(Route::Overview {});
    });

    rsx! {
        div { class: "flex items-center justify-center min-h-screen bg-[#1e1f22] text-gray-400",
            "Redirecting..."
        }
    }
}
