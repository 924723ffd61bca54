//! Uniform pending placeholder.

use dioxus::prelude::*;

/// Renders `placeholder` (or a default spinner) while `pending`, else the
/// children. Pure composition: the boundary owns no state, it just gives
/// every collection and session consumer the same pending convention.
#[component]
pub fn SuspenseBoundary(
    pending: bool,
    placeholder: Option<Element>,
    children: Element,
) -> Element {
    if !pending {
        return children;
    }
    match placeholder {
        Some(placeholder) => placeholder,
        None => rsx! {
            div { class: "flex items-center justify-center p-10 text-gray-400",
                div { class: "w-5 h-5 mr-3 rounded-full border-2 border-gray-500 border-t-transparent animate-spin" }
                "Loading..."
            }
        },
    }
}
