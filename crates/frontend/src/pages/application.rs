//! Multi-step application form, saved one step at a time

use super::{BUTTON_CLASS, INPUT_CLASS, use_student};
use crate::app::Route;
use admissions_frontend_common::ErrorBanner;
use admissions_frontend_common::auth::user_message;
use serde_json::{Map, Value as JsonValue};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

struct Step {
    key: &'static str,
    title: &'static str,
    fields: &'static [(&'static str, &'static str)],
}

const STEPS: &[Step] = &[
    Step {
        key: "personal",
        title: "Personal details",
        fields: &[
            ("dateOfBirth", "Date of birth"),
            ("nationality", "Nationality"),
            ("phone", "Phone number"),
        ],
    },
    Step {
        key: "education",
        title: "Education",
        fields: &[
            ("school", "Most recent school"),
            ("graduationYear", "Graduation year"),
            ("gpa", "GPA"),
        ],
    },
    Step {
        key: "statement",
        title: "Personal statement",
        fields: &[("statement", "Why this program?")],
    },
];

pub const FIRST_STEP: &str = "personal";

fn step_index(key: &str) -> Option<usize> {
    STEPS.iter().position(|step| step.key == key)
}

#[derive(Properties, PartialEq)]
pub struct ApplicationPageProps {
    pub id: String,
    pub step: String,
}

#[function_component(ApplicationPage)]
pub fn application_page(props: &ApplicationPageProps) -> Html {
    let student = use_student();
    let navigator = use_navigator();
    let answers = use_state(Map::<String, JsonValue>::new);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    // Fresh answers per step
    {
        let answers = answers.clone();
        use_effect_with(props.step.clone(), move |_| answers.set(Map::new()));
    }

    let Some(index) = step_index(&props.step) else {
        return html! { <Redirect<Route> to={Route::NotFound} /> };
    };
    let step = &STEPS[index];
    let next_route = STEPS.get(index + 1).map_or(
        Route::Payment {
            id: props.id.clone(),
        },
        |next| Route::Application {
            id: props.id.clone(),
            step: next.key.to_string(),
        },
    );

    let on_field = |name: &'static str| {
        let answers = answers.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            let mut next = (*answers).clone();
            next.insert(name.to_string(), JsonValue::String(value));
            answers.set(next);
        })
    };

    let on_submit = {
        let answers = answers.clone();
        let error = error.clone();
        let saving = saving.clone();
        let application_id = props.id.clone();
        let step_key = step.key;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (Some((client, _)), Some(navigator)) = (student.clone(), navigator.clone()) else {
                return;
            };
            let body = JsonValue::Object((*answers).clone());
            let application_id = application_id.clone();
            let next_route = next_route.clone();
            let error = error.clone();
            let saving = saving.clone();
            saving.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match client
                    .save_application_step(&application_id, step_key, &body)
                    .await
                {
                    Ok(_) => navigator.push(&next_route),
                    Err(e) => error.set(Some(user_message(&e))),
                }
                saving.set(false);
            });
        })
    };

    html! {
        <div class="bg-white rounded-lg shadow p-8">
            <p class="text-sm text-gray-500">{ format!("Step {} of {}", index + 1, STEPS.len()) }</p>
            <h1 class="text-2xl font-bold mb-6">{step.title}</h1>
            if let Some(message) = &*error {
                <ErrorBanner message={message.clone()} />
            }
            <form onsubmit={on_submit} class="space-y-4">
                { for step.fields.iter().map(|(name, label)| html! {
                    <label class="block">
                        <span class="text-sm text-gray-700">{*label}</span>
                        <input class={INPUT_CLASS}
                            value={answers.get(*name).and_then(JsonValue::as_str).unwrap_or_default().to_string()}
                            oninput={on_field(*name)} />
                    </label>
                }) }
                <button type="submit" class={BUTTON_CLASS} disabled={*saving}>
                    {"Save and continue"}
                </button>
            </form>
        </div>
    }
}
