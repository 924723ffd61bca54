use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    pub value: String,
    pub oninput: EventHandler<FormEvent>,
    #[props(optional)]
    pub label: Option<String>,
    #[props(optional)]
    pub placeholder: Option<String>,
    #[props(optional)]
    pub r#type: Option<String>,
}

#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    rsx! {
        div {
            if let Some(label) = &props.label {
                label { class: "block text-sm font-medium text-gray-300 mb-2", "{label}" }
            }
            input {
                class: "w-full bg-[#1e1f22] border border-[#3f4147] rounded-lg px-4 py-2.5 text-white placeholder-[#6d6f78] focus:outline-none focus:border-indigo-500 transition-colors",
                r#type: props.r#type.clone().unwrap_or_else(|| "text".to_string()),
                placeholder: props.placeholder.clone().unwrap_or_default(),
                value: "{props.value}",
                oninput: move |e| props.oninput.call(e),
            }
        }
    }
}
