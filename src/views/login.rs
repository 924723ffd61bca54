//! Login view.

use dioxus::prelude::*;

use crate::auth_session::SessionContext;
use crate::components::ui::{Button, TextInput};
use crate::identity::StoredSession;
use crate::models::{AuthResponse, LoginRequest};
use crate::routes::Route;

#[component]
pub fn Login() -> Element {
    let ctx = use_context::<SessionContext>();
    let nav = use_navigator();

    let mut handle = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_loading = use_signal(|| false);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let handle_value = handle.read().trim().to_string();
        let password_value = password.read().clone();
        if handle_value.is_empty() || password_value.is_empty() {
            error.set(Some("Handle and password are required".to_string()));
            return;
        }

        is_loading.set(true);
        let ctx = ctx.clone();
        spawn(async move {
            let client = ctx.client();
            match client
                .post_json::<_, AuthResponse>(
                    "/api/auth/login",
                    &LoginRequest {
                        handle: handle_value,
                        password: password_value,
                    },
                )
                .await
            {
                Ok(resp) => {
                    ctx.sign_in(StoredSession {
                        identity: resp.user,
                        token: resp.token,
                    });
                    nav.push(Route::Overview {});
                }
                Err(err) => {
                    error.set(Some(err.user_message()));
                    is_loading.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "flex items-center justify-center min-h-screen bg-[#1e1f22]",
            div { class: "bg-[#2b2d31] rounded-lg shadow-2xl w-full max-w-md mx-4 p-8",
                h1 { class: "text-2xl font-bold text-white mb-1", "Welcome back" }
                p { class: "text-sm text-gray-400 mb-6", "Sign in to your board" }

                form { onsubmit: handle_submit, class: "space-y-4",
                    TextInput {
                        label: "Handle",
                        placeholder: "your-handle",
                        value: "{handle}",
                        oninput: move |e: FormEvent| {
                            handle.set(e.value());
                            error.set(None);
                        },
                    }
                    TextInput {
                        label: "Password",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |e: FormEvent| {
                            password.set(e.value());
                            error.set(None);
                        },
                    }
                    if let Some(err) = error.read().as_ref() {
                        div { class: "p-3 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400 text-sm",
                            "{err}"
                        }
                    }
                    Button {
                        r#type: "submit",
                        class: "w-full",
                        disabled: *is_loading.read(),
                        if *is_loading.read() { "Signing in..." } else { "Sign In" }
                    }
                }

                p { class: "mt-6 text-sm text-gray-400 text-center",
                    "No account yet? "
                    Link {
                        to: Route::Register {},
                        class: "text-indigo-400 hover:text-indigo-300",
                        "Register"
                    }
                }
            }
        }
    }
}
