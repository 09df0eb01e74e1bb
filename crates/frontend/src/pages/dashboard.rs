//! Student dashboard: profile summary, applications and a new application form

use super::{BUTTON_CLASS, INPUT_CLASS, Loadable, use_student};
use crate::app::Route;
use crate::pages::application::FIRST_STEP;
use admissions_frontend_common::auth::user_message;
use admissions_frontend_common::{ErrorBanner, Spinner};
use admissions_http::ClientError;
use admissions_http::types::{Application, ApplicationStatus, NewApplication, StudentProfile};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, PartialEq)]
struct Overview {
    profile: StudentProfile,
    applications: Vec<Application>,
}

const fn status_label(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Draft => "Draft",
        ApplicationStatus::Submitted => "Submitted",
        ApplicationStatus::UnderReview => "Under review",
        ApplicationStatus::Accepted => "Accepted",
        ApplicationStatus::Rejected => "Not accepted",
        ApplicationStatus::Unknown => "Pending",
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let student = use_student();
    let overview = use_state(|| Loadable::<Overview>::Loading);

    {
        let overview = overview.clone();
        use_effect_with((), move |()| {
            let Some((client, student_id)) = student else {
                overview.set(Loadable::Failed("Your session is missing a student id.".into()));
                return;
            };
            wasm_bindgen_futures::spawn_local(async move {
                let result = async {
                    let profile = client.student_profile(&student_id).await?;
                    let applications = client.list_applications(&student_id).await?;
                    Ok::<_, ClientError>(Overview {
                        profile,
                        applications,
                    })
                }
                .await;
                overview.set(match result {
                    Ok(data) => Loadable::Loaded(data),
                    Err(e) => Loadable::Failed(user_message(&e)),
                });
            });
        });
    }

    match &*overview {
        Loadable::Loading => html! { <Spinner text={"Loading your applications..."} /> },
        Loadable::Failed(message) => html! { <ErrorBanner message={message.clone()} /> },
        Loadable::Loaded(data) => html! {
            <div class="space-y-8">
                <h1 class="text-2xl font-bold">
                    { format!("Welcome, {}", data.profile.display_name().unwrap_or_else(|| "applicant".into())) }
                </h1>
                <section>
                    <h2 class="text-lg font-semibold mb-3">{"Your applications"}</h2>
                    if data.applications.is_empty() {
                        <p class="text-gray-600">{"You have not started an application yet."}</p>
                    }
                    <ul class="divide-y divide-gray-200 bg-white rounded-lg shadow">
                        { for data.applications.iter().map(application_row) }
                    </ul>
                </section>
                <NewApplicationForm />
            </div>
        },
    }
}

fn application_row(application: &Application) -> Html {
    let continue_to = Route::Application {
        id: application.id.clone(),
        step: FIRST_STEP.to_string(),
    };
    let pay = Route::Payment {
        id: application.id.clone(),
    };

    html! {
        <li class="p-4 flex justify-between items-center">
            <div>
                <p class="font-medium">{&application.program}</p>
                <p class="text-sm text-gray-500">{status_label(application.status)}</p>
            </div>
            <div class="flex gap-4 text-sm">
                if application.status == ApplicationStatus::Draft {
                    <Link<Route> to={continue_to} classes="text-blue-700">{"Continue"}</Link<Route>>
                    <Link<Route> to={pay} classes="text-blue-700">{"Pay fee"}</Link<Route>>
                }
            </div>
        </li>
    }
}

#[function_component(NewApplicationForm)]
fn new_application_form() -> Html {
    let student = use_student();
    let navigator = use_navigator();
    let program = use_state(String::new);
    let intake = use_state(String::new);
    let error = use_state(|| None::<String>);

    let on_program = {
        let program = program.clone();
        Callback::from(move |e: InputEvent| {
            program.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_intake = {
        let intake = intake.clone();
        Callback::from(move |e: InputEvent| {
            intake.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let program = program.clone();
        let intake = intake.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (Some((client, student_id)), Some(navigator)) = (student.clone(), navigator.clone())
            else {
                return;
            };
            let request = NewApplication {
                student_id,
                program: (*program).clone(),
                intake: (*intake).clone(),
            };
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match client.submit_application(&request).await {
                    Ok(application) => navigator.push(&Route::Application {
                        id: application.id,
                        step: FIRST_STEP.to_string(),
                    }),
                    Err(e) => error.set(Some(user_message(&e))),
                }
            });
        })
    };

    html! {
        <section class="bg-white rounded-lg shadow p-6">
            <h2 class="text-lg font-semibold mb-3">{"Start a new application"}</h2>
            if let Some(message) = &*error {
                <ErrorBanner message={message.clone()} />
            }
            <form onsubmit={on_submit} class="grid gap-4 sm:grid-cols-3">
                <input placeholder="Program" required=true class={INPUT_CLASS}
                    value={(*program).clone()} oninput={on_program} />
                <input placeholder="Intake (e.g. Fall 2027)" required=true class={INPUT_CLASS}
                    value={(*intake).clone()} oninput={on_intake} />
                <button type="submit" class={BUTTON_CLASS}>{"Start"}</button>
            </form>
        </section>
    }
}
