use dioxus::prelude::*;

#[component]
pub fn Card(#[props(optional)] class: Option<String>, children: Element) -> Element {
    let class = match class {
        Some(extra) if !extra.is_empty() => {
            format!("bg-[#2b2d31] rounded-lg border border-[#3f4147] p-5 {extra}")
        }
        _ => "bg-[#2b2d31] rounded-lg border border-[#3f4147] p-5".to_string(),
    };

    rsx! {
        div { class, {children} }
    }
}
