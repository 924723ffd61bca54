//! Board overview: headline numbers across both collections.

use dioxus::prelude::*;

use crate::components::ui::Card;
use crate::components::SuspenseBoundary;
use crate::hooks::use_collection;
use crate::models::{Project, ProjectStatus, Task};
use crate::routes::Route;

#[component]
pub fn Overview() -> Element {
    let projects = use_collection::<Project>("projects");
    let tasks = use_collection::<Task>("tasks");

    let project_items = projects.data();
    let task_items = tasks.data();

    let active_projects = project_items
        .iter()
        .filter(|p| p.status == ProjectStatus::Active)
        .count();
    let open_tasks = task_items.iter().filter(|t| !t.done).count();

    let pending = (projects.is_loading() && project_items.is_empty())
        || (tasks.is_loading() && task_items.is_empty());

    rsx! {
        div { class: "p-8",
            h2 { class: "text-2xl font-bold mb-6", "Overview" }

            SuspenseBoundary { pending,
                div { class: "grid grid-cols-1 md:grid-cols-3 gap-4 mb-8",
                    StatCard { label: "Projects", value: project_items.len() }
                    StatCard { label: "Active projects", value: active_projects }
                    StatCard { label: "Open tasks", value: open_tasks }
                }

                if let Some(err) = projects.error().or(tasks.error()) {
                    div { class: "p-3 mb-6 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400 text-sm",
                        "{err.user_message()}"
                    }
                }

                div { class: "grid grid-cols-1 lg:grid-cols-2 gap-6",
                    Card {
                        div { class: "flex items-center justify-between mb-4",
                            h3 { class: "font-semibold", "Recent projects" }
                            Link {
                                to: Route::Projects {},
                                class: "text-sm text-indigo-400 hover:text-indigo-300",
                                "View all"
                            }
                        }
                        if project_items.is_empty() {
                            p { class: "text-sm text-gray-500 italic", "No projects yet" }
                        } else {
                            ul { class: "space-y-2",
                                for project in project_items.iter().take(5) {
                                    li {
                                        key: "{project.id}",
                                        class: "flex items-center justify-between text-sm",
                                        span { class: "truncate", "{project.name}" }
                                        span { class: "text-xs text-gray-500 ml-2 shrink-0",
                                            "{project.status.label()}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                    Card {
                        div { class: "flex items-center justify-between mb-4",
                            h3 { class: "font-semibold", "Open tasks" }
                            Link {
                                to: Route::Tasks {},
                                class: "text-sm text-indigo-400 hover:text-indigo-300",
                                "View all"
                            }
                        }
                        if open_tasks == 0 {
                            p { class: "text-sm text-gray-500 italic", "Nothing open" }
                        } else {
                            ul { class: "space-y-2",
                                for task in task_items.iter().filter(|t| !t.done).take(5) {
                                    li {
                                        key: "{task.id}",
                                        class: "text-sm truncate",
                                        "{task.title}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StatCard(label: String, value: usize) -> Element {
    rsx! {
        Card {
            div { class: "text-3xl font-bold", "{value}" }
            div { class: "text-sm text-gray-400 mt-1", "{label}" }
        }
    }
}
