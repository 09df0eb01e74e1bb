//! Assigned tasks and document uploads

use super::{Loadable, use_student};
use admissions_frontend_common::auth::user_message;
use admissions_frontend_common::{ErrorBanner, Spinner};
use admissions_http::types::{Task, TaskStatus, TaskSubmission, UploadUrlRequest};
use admissions_http::{AuthenticatedPortalClient, ClientError};
use js_sys::Uint8Array;
use std::rc::Rc;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

const fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "To do",
        TaskStatus::Submitted => "Submitted",
        TaskStatus::Approved => "Approved",
        TaskStatus::Rejected => "Needs changes",
        TaskStatus::Unknown => "Pending",
    }
}

async fn read_file(file: &File) -> Result<Vec<u8>, ClientError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ClientError::Configuration(format!("Could not read file: {e:?}")))?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

/// Upload `file` to a pre-signed target, then submit the task with its key
async fn upload_and_submit(
    client: &AuthenticatedPortalClient,
    task_id: &str,
    file: File,
) -> Result<Task, ClientError> {
    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    let target = client
        .request_upload_url(
            task_id,
            &UploadUrlRequest {
                file_name: file.name(),
                content_type: content_type.clone(),
            },
        )
        .await?;
    let bytes = read_file(&file).await?;
    client.upload_document(&target, &content_type, bytes).await?;
    client
        .submit_task(
            task_id,
            &TaskSubmission {
                file_key: Some(target.file_key),
                note: None,
            },
        )
        .await
}

/// Task list state; uploads apply on top of whatever is current
#[derive(Clone, PartialEq)]
struct TaskList(Loadable<Vec<Task>>);

impl Default for TaskList {
    fn default() -> Self {
        Self(Loadable::Loading)
    }
}

enum TaskAction {
    Loaded(Loadable<Vec<Task>>),
    Updated(Task),
}

impl Reducible for TaskList {
    type Action = TaskAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            TaskAction::Loaded(state) => Rc::new(Self(state)),
            TaskAction::Updated(updated) => match &self.0 {
                Loadable::Loaded(list) => {
                    let list = list
                        .iter()
                        .map(|task| {
                            if task.id == updated.id {
                                updated.clone()
                            } else {
                                task.clone()
                            }
                        })
                        .collect();
                    Rc::new(Self(Loadable::Loaded(list)))
                }
                _ => self,
            },
        }
    }
}

#[function_component(TasksPage)]
pub fn tasks_page() -> Html {
    let student = use_student();
    let tasks = use_reducer(TaskList::default);
    let error = use_state(|| None::<String>);

    {
        let tasks = tasks.clone();
        let student = student.clone();
        use_effect_with((), move |()| {
            let Some((client, student_id)) = student else {
                tasks.dispatch(TaskAction::Loaded(Loadable::Failed(
                    "Your session is missing a student id.".into(),
                )));
                return;
            };
            wasm_bindgen_futures::spawn_local(async move {
                tasks.dispatch(TaskAction::Loaded(match client.list_tasks(&student_id).await {
                    Ok(list) => Loadable::Loaded(list),
                    Err(e) => Loadable::Failed(user_message(&e)),
                }));
            });
        });
    }

    let on_upload = {
        let tasks = tasks.clone();
        let error = error.clone();
        Callback::from(move |(task_id, file): (String, File)| {
            let Some((client, _)) = student.clone() else {
                return;
            };
            let tasks = tasks.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match upload_and_submit(&client, &task_id, file).await {
                    Ok(updated) => tasks.dispatch(TaskAction::Updated(updated)),
                    Err(e) => error.set(Some(user_message(&e))),
                }
            });
        })
    };

    let body = match &tasks.0 {
        Loadable::Loading => html! { <Spinner text={"Loading tasks..."} /> },
        Loadable::Failed(message) => html! { <ErrorBanner message={message.clone()} /> },
        Loadable::Loaded(list) if list.is_empty() => {
            html! { <p class="text-gray-600">{"Nothing to do right now."}</p> }
        }
        Loadable::Loaded(list) => html! {
            <ul class="divide-y divide-gray-200 bg-white rounded-lg shadow">
                { for list.iter().map(|task| html! {
                    <TaskRow task={task.clone()} on_upload={on_upload.clone()} />
                }) }
            </ul>
        },
    };

    html! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">{"Your tasks"}</h1>
            if let Some(message) = &*error {
                <ErrorBanner message={message.clone()} />
            }
            { body }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TaskRowProps {
    task: Task,
    on_upload: Callback<(String, File)>,
}

#[function_component(TaskRow)]
fn task_row(props: &TaskRowProps) -> Html {
    let task = &props.task;
    let on_change = {
        let on_upload = props.on_upload.clone();
        let task_id = task.id.clone();
        Callback::from(move |e: Event| {
            let input = e.target_unchecked_into::<HtmlInputElement>();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_upload.emit((task_id.clone(), file));
            }
        })
    };
    let can_upload = task.requires_document
        && matches!(task.status, TaskStatus::Pending | TaskStatus::Rejected);

    html! {
        <li class="p-4 flex justify-between items-center">
            <div>
                <p class="font-medium">{&task.title}</p>
                <p class="text-sm text-gray-500">
                    {status_label(task.status)}
                    if let Some(due) = &task.due_date {
                        { format!(" · due {due}") }
                    }
                </p>
            </div>
            if can_upload {
                <input type="file" class="text-sm" onchange={on_change} />
            }
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            status,
            due_date: None,
            requires_document: true,
        }
    }

    #[test]
    fn test_successive_uploads_both_apply() {
        let list = Rc::new(TaskList(Loadable::Loaded(vec![
            task("t1", TaskStatus::Pending),
            task("t2", TaskStatus::Pending),
        ])));

        let list = list.reduce(TaskAction::Updated(task("t1", TaskStatus::Submitted)));
        let list = list.reduce(TaskAction::Updated(task("t2", TaskStatus::Submitted)));

        let Loadable::Loaded(tasks) = &list.0 else {
            panic!("task list should stay loaded");
        };
        assert!(tasks.iter().all(|t| t.status == TaskStatus::Submitted));
    }

    #[test]
    fn test_update_before_load_is_ignored() {
        let list = Rc::new(TaskList::default());
        let list = list.reduce(TaskAction::Updated(task("t1", TaskStatus::Submitted)));
        assert!(list.0 == Loadable::Loading);
    }
}
