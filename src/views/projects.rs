//! Projects collection view.
//!
//! Mutations here show the synchronization contract end to end: a create,
//! update, or delete goes to the store first and the list is picked up
//! again with an explicit refresh; nothing is patched locally.

use dioxus::prelude::*;

use crate::components::ui::{Button, ButtonVariant, Card, TextInput};
use crate::components::SuspenseBoundary;
use crate::hooks::use_collection;
use crate::log_warn;
use crate::models::{CreateProjectRequest, Project, ProjectStatus, UpdateProjectRequest};

#[component]
pub fn Projects() -> Element {
    let projects = use_collection::<Project>("projects");

    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut is_saving = use_signal(|| false);
    let mut form_error = use_signal(|| None::<String>);

    let handle_create = {
        let projects = projects.clone();
        move |e: FormEvent| {
            e.prevent_default();
            let name_value = name.read().trim().to_string();
            if name_value.is_empty() {
                form_error.set(Some("Project name is required".to_string()));
                return;
            }
            let description_value = description.read().trim().to_string();

            is_saving.set(true);
            let projects = projects.clone();
            spawn(async move {
                let request = CreateProjectRequest {
                    name: name_value,
                    description: if description_value.is_empty() {
                        None
                    } else {
                        Some(description_value)
                    },
                };
                match projects.create(&request).await {
                    Ok(_) => {
                        name.set(String::new());
                        description.set(String::new());
                        form_error.set(None);
                        if let Err(e) = projects.refresh().await {
                            log_warn!("refresh after create failed: {}", e);
                        }
                    }
                    Err(err) => {
                        form_error.set(Some(err.user_message()));
                    }
                }
                is_saving.set(false);
            });
        }
    };

    let items = projects.data();

    rsx! {
        div { class: "p-8",
            div { class: "flex items-center justify-between mb-6",
                h2 { class: "text-2xl font-bold", "Projects" }
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: {
                        let projects = projects.clone();
                        move |_| {
                            let projects = projects.clone();
                            spawn(async move {
                                if let Err(e) = projects.refresh().await {
                                    log_warn!("manual refresh failed: {}", e);
                                }
                            });
                        }
                    },
                    "Refresh"
                }
            }

            Card { class: "mb-6",
                h3 { class: "font-semibold mb-4", "New project" }
                form { onsubmit: handle_create, class: "space-y-3",
                    TextInput {
                        placeholder: "Project name",
                        value: "{name}",
                        oninput: move |e: FormEvent| {
                            name.set(e.value());
                            form_error.set(None);
                        },
                    }
                    TextInput {
                        placeholder: "Description (optional)",
                        value: "{description}",
                        oninput: move |e: FormEvent| description.set(e.value()),
                    }
                    if let Some(err) = form_error.read().as_ref() {
                        div { class: "p-3 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400 text-sm",
                            "{err}"
                        }
                    }
                    Button {
                        r#type: "submit",
                        disabled: *is_saving.read(),
                        if *is_saving.read() { "Creating..." } else { "Create project" }
                    }
                }
            }

            if let Some(err) = projects.error() {
                div { class: "p-3 mb-4 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400 text-sm",
                    "{err.user_message()}"
                }
            }

            SuspenseBoundary { pending: projects.is_loading() && items.is_empty(),
                if items.is_empty() {
                    p { class: "text-gray-500 italic", "No projects yet. Create the first one above." }
                } else {
                    div { class: "space-y-3",
                        for project in items.iter() {
                            ProjectRow {
                                key: "{project.id}",
                                project: project.clone(),
                                projects: projects.clone(),
                            }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone)]
struct ProjectRowProps {
    project: Project,
    projects: crate::hooks::UseCollection<Project>,
}

impl PartialEq for ProjectRowProps {
    fn eq(&self, other: &Self) -> bool {
        self.project == other.project
    }
}

#[component]
fn ProjectRow(props: ProjectRowProps) -> Element {
    let project = props.project.clone();

    let next_status = match project.status {
        ProjectStatus::Active => ProjectStatus::Paused,
        ProjectStatus::Paused => ProjectStatus::Done,
        ProjectStatus::Done => ProjectStatus::Active,
    };

    let advance_status = {
        let projects = props.projects.clone();
        let id = project.id.clone();
        move |_| {
            let projects = projects.clone();
            let id = id.clone();
            spawn(async move {
                let request = UpdateProjectRequest {
                    status: Some(next_status),
                    ..Default::default()
                };
                if projects.update(&id, &request).await.is_ok() {
                    if let Err(e) = projects.refresh().await {
                        log_warn!("refresh after update failed: {}", e);
                    }
                }
            });
        }
    };

    let remove = {
        let projects = props.projects.clone();
        let id = project.id.clone();
        move |_| {
            let projects = projects.clone();
            let id = id.clone();
            spawn(async move {
                if projects.delete(&id).await.is_ok() {
                    if let Err(e) = projects.refresh().await {
                        log_warn!("refresh after delete failed: {}", e);
                    }
                }
            });
        }
    };

    rsx! {
        Card {
            div { class: "flex items-center justify-between",
                div { class: "min-w-0",
                    div { class: "font-medium truncate", "{project.name}" }
                    if let Some(description) = &project.description {
                        div { class: "text-sm text-gray-400 truncate", "{description}" }
                    }
                    div { class: "text-xs text-gray-500 mt-1",
                        "Created {project.created_at.format(\"%Y-%m-%d\")}"
                    }
                }
                div { class: "flex items-center gap-2 ml-4 shrink-0",
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: advance_status,
                        "Mark {next_status.label()}"
                    }
                    Button {
                        variant: ButtonVariant::Danger,
                        onclick: remove,
                        "Delete"
                    }
                }
            }
        }
    }
}
