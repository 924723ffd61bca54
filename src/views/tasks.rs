//! Tasks collection view.

use dioxus::prelude::*;

use crate::components::ui::{Button, ButtonVariant, Card, TextInput};
use crate::components::SuspenseBoundary;
use crate::hooks::use_collection;
use crate::log_warn;
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};

#[component]
pub fn Tasks() -> Element {
    let tasks = use_collection::<Task>("tasks");

    let mut title = use_signal(String::new);
    let mut is_saving = use_signal(|| false);
    let mut form_error = use_signal(|| None::<String>);

    let handle_create = {
        let tasks = tasks.clone();
        move |e: FormEvent| {
            e.prevent_default();
            let title_value = title.read().trim().to_string();
            if title_value.is_empty() {
                form_error.set(Some("Task title is required".to_string()));
                return;
            }

            is_saving.set(true);
            let tasks = tasks.clone();
            spawn(async move {
                let request = CreateTaskRequest {
                    title: title_value,
                    project_id: None,
                };
                match tasks.create(&request).await {
                    Ok(_) => {
                        title.set(String::new());
                        form_error.set(None);
                        if let Err(e) = tasks.refresh().await {
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

    let items = tasks.data();
    let open_count = items.iter().filter(|t| !t.done).count();

    rsx! {
        div { class: "p-8",
            div { class: "flex items-center justify-between mb-6",
                h2 { class: "text-2xl font-bold", "Tasks" }
                span { class: "text-sm text-gray-400", "{open_count} open" }
            }

            Card { class: "mb-6",
                form { onsubmit: handle_create, class: "flex gap-3 items-start",
                    div { class: "flex-1",
                        TextInput {
                            placeholder: "What needs doing?",
                            value: "{title}",
                            oninput: move |e: FormEvent| {
                                title.set(e.value());
                                form_error.set(None);
                            },
                        }
                    }
                    Button {
                        r#type: "submit",
                        disabled: *is_saving.read(),
                        if *is_saving.read() { "Adding..." } else { "Add" }
                    }
                }
                if let Some(err) = form_error.read().as_ref() {
                    div { class: "p-3 mt-3 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400 text-sm",
                        "{err}"
                    }
                }
            }

            if let Some(err) = tasks.error() {
                div { class: "p-3 mb-4 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400 text-sm",
                    "{err.user_message()}"
                }
            }

            SuspenseBoundary { pending: tasks.is_loading() && items.is_empty(),
                if items.is_empty() {
                    p { class: "text-gray-500 italic", "No tasks yet." }
                } else {
                    div { class: "space-y-2",
                        for task in items.iter() {
                            TaskRow {
                                key: "{task.id}",
                                task: task.clone(),
                                tasks: tasks.clone(),
                            }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone)]
struct TaskRowProps {
    task: Task,
    tasks: crate::hooks::UseCollection<Task>,
}

impl PartialEq for TaskRowProps {
    fn eq(&self, other: &Self) -> bool {
        self.task == other.task
    }
}

#[component]
fn TaskRow(props: TaskRowProps) -> Element {
    let task = props.task.clone();

    let toggle = {
        let tasks = props.tasks.clone();
        let id = task.id.clone();
        let done = task.done;
        move |_| {
            let tasks = tasks.clone();
            let id = id.clone();
            spawn(async move {
                let request = UpdateTaskRequest {
                    done: Some(!done),
                    ..Default::default()
                };
                if tasks.update(&id, &request).await.is_ok() {
                    if let Err(e) = tasks.refresh().await {
                        log_warn!("refresh after update failed: {}", e);
                    }
                }
            });
        }
    };

    let remove = {
        let tasks = props.tasks.clone();
        let id = task.id.clone();
        move |_| {
            let tasks = tasks.clone();
            let id = id.clone();
            spawn(async move {
                if tasks.delete(&id).await.is_ok() {
                    if let Err(e) = tasks.refresh().await {
                        log_warn!("refresh after delete failed: {}", e);
                    }
                }
            });
        }
    };

    let title_class = if task.done {
        "text-sm line-through text-gray-500 truncate"
    } else {
        "text-sm truncate"
    };

    rsx! {
        div { class: "flex items-center gap-3 bg-[#2b2d31] rounded-lg border border-[#3f4147] px-4 py-3",
            input {
                r#type: "checkbox",
                checked: task.done,
                onchange: toggle,
                class: "w-4 h-4 rounded accent-indigo-500 cursor-pointer",
            }
            span { class: title_class, "{task.title}" }
            div { class: "flex-1" }
            Button {
                variant: ButtonVariant::Danger,
                class: "px-2 py-1 text-xs",
                onclick: remove,
                "Delete"
            }
        }
    }
}
