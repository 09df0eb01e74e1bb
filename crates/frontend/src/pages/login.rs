//! Sign-in form

use crate::app::Route;
use admissions_frontend_common::auth::user_message;
use admissions_frontend_common::services::AuthApiService;
use admissions_frontend_common::{ErrorBanner, use_portal};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let portal = use_portal();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            email.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            password.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(portal) = portal.clone() else {
                return;
            };
            let service = AuthApiService::new(portal);
            let (email, password) = ((*email).clone(), (*password).clone());
            let error = error.clone();
            let submitting = submitting.clone();
            submitting.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                // Success navigates away from the page
                if let Err(e) = service.login(email, password).await {
                    error.set(Some(user_message(&e)));
                    submitting.set(false);
                }
            });
        })
    };

    html! {
        <div class="max-w-md mx-auto bg-white rounded-lg shadow p-8">
            <h1 class="text-2xl font-bold mb-6">{"Sign in"}</h1>
            if let Some(message) = &*error {
                <ErrorBanner message={message.clone()} />
            }
            <form onsubmit={on_submit} class="space-y-4">
                <input type="email" placeholder="Email" required=true class={super::INPUT_CLASS}
                    value={(*email).clone()} oninput={on_email} />
                <input type="password" placeholder="Password" required=true class={super::INPUT_CLASS}
                    value={(*password).clone()} oninput={on_password} />
                <button type="submit" class={super::BUTTON_CLASS} disabled={*submitting}>
                    { if *submitting { "Signing in..." } else { "Sign in" } }
                </button>
            </form>
            <p class="mt-6 text-sm text-gray-600">
                {"New applicant? "}
                <Link<Route> to={Route::Register} classes="text-blue-700">{"Create an account"}</Link<Route>>
            </p>
        </div>
    }
}
