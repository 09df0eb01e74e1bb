use admissions_frontend_common::auth::user_message;
use admissions_frontend_common::services::AuthApiService;
use admissions_frontend_common::{ErrorBanner, use_portal};
use admissions_http::types::RegisterRequest;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, Copy)]
enum Field {
    FirstName,
    LastName,
    Email,
    Password,
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let portal = use_portal();
    let form = use_state(|| RegisterRequest {
        first_name: String::new(),
        last_name: String::new(),
        email: String::new(),
        password: String::new(),
    });
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_input = |field: Field| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            let mut next = (*form).clone();
            match field {
                Field::FirstName => next.first_name = value,
                Field::LastName => next.last_name = value,
                Field::Email => next.email = value,
                Field::Password => next.password = value,
            }
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(portal) = portal.clone() else {
                return;
            };
            let request = (*form).clone();
            let error = error.clone();
            let submitting = submitting.clone();
            submitting.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = AuthApiService::new(portal).register(request).await {
                    error.set(Some(user_message(&e)));
                    submitting.set(false);
                }
            });
        })
    };

    html! {
        <div class="max-w-md mx-auto bg-white rounded-lg shadow p-8">
            <h1 class="text-2xl font-bold mb-6">{"Create your applicant account"}</h1>
            if let Some(message) = &*error {
                <ErrorBanner message={message.clone()} />
            }
            <form onsubmit={on_submit} class="space-y-4">
                <input placeholder="First name" required=true class={super::INPUT_CLASS}
                    value={form.first_name.clone()} oninput={on_input(Field::FirstName)} />
                <input placeholder="Last name" required=true class={super::INPUT_CLASS}
                    value={form.last_name.clone()} oninput={on_input(Field::LastName)} />
                <input type="email" placeholder="Email" required=true class={super::INPUT_CLASS}
                    value={form.email.clone()} oninput={on_input(Field::Email)} />
                <input type="password" placeholder="Password" required=true class={super::INPUT_CLASS}
                    value={form.password.clone()} oninput={on_input(Field::Password)} />
                <button type="submit" class={super::BUTTON_CLASS} disabled={*submitting}>
                    {"Register"}
                </button>
            </form>
        </div>
    }
}
