//! Dashboard shell: sidebar navigation around the gated outlet.

use dioxus::prelude::*;

use crate::auth_gate::AuthGate;
use crate::auth_session::SessionContext;
use crate::routes::Route;

#[component]
pub fn DashboardLayout() -> Element {
    rsx! {
        div { class: "flex min-h-screen bg-[#1e1f22] text-white",
            Sidebar {}
            main { class: "flex-1 flex flex-col overflow-y-auto",
                AuthGate {
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<SessionContext>();
    let nav = use_navigator();
    let route = use_route::<Route>();

    let identity = ctx.identity();

    rsx! {
        aside { class: "w-56 bg-[#2b2d31] flex flex-col border-r border-[#1e1f22]",
            div { class: "px-4 py-4 border-b border-[#1e1f22]",
                h1 { class: "text-lg font-bold", "Opsboard" }
            }
            nav { class: "flex-1 p-2 space-y-0.5",
                SidebarLink {
                    to: Route::Overview {},
                    active: route == Route::Overview {},
                    label: "Overview",
                }
                SidebarLink {
                    to: Route::Projects {},
                    active: route == Route::Projects {},
                    label: "Projects",
                }
                SidebarLink {
                    to: Route::Tasks {},
                    active: route == Route::Tasks {},
                    label: "Tasks",
                }
            }
            div { class: "p-3 border-t border-[#1e1f22]",
                if let Some(identity) = identity {
                    div { class: "flex items-center justify-between",
                        div { class: "min-w-0",
                            div { class: "text-sm font-medium truncate", "{identity.handle}" }
                            if let Some(email) = &identity.email {
                                div { class: "text-xs text-gray-500 truncate", "{email}" }
                            }
                        }
                        button {
                            class: "text-xs text-gray-400 hover:text-white transition-colors ml-2 shrink-0",
                            onclick: {
                                let ctx = ctx.clone();
                                move |_| {
                                    ctx.sign_out();
                                    nav.push(Route::Login {});
                                }
                            },
                            "Sign out"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SidebarLink(to: Route, active: bool, label: String) -> Element {
    let class = if active {
        "block px-3 py-2 rounded text-sm font-medium bg-[#404249] text-white"
    } else {
        "block px-3 py-2 rounded text-sm font-medium text-[#b5bac1] hover:bg-[#35373c] hover:text-white transition-colors"
    };

    rsx! {
        Link { to, class, "{label}" }
    }
}
