use crate::app::Route;
use admissions_frontend_common::use_is_authenticated;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let is_authenticated = use_is_authenticated();

    html! {
        <div class="text-center py-16">
            <h1 class="text-4xl font-extrabold text-gray-900">{"Start your application"}</h1>
            <p class="mt-4 text-gray-600">
                {"Apply to our programs, upload your documents and track every step of your admission."}
            </p>
            <div class="mt-8 flex justify-center gap-4">
                if is_authenticated {
                    <Link<Route> to={Route::Dashboard} classes={super::BUTTON_CLASS}>
                        {"Go to dashboard"}
                    </Link<Route>>
                } else {
                    <Link<Route> to={Route::Register} classes={super::BUTTON_CLASS}>
                        {"Create an account"}
                    </Link<Route>>
                    <Link<Route> to={Route::Login} classes="px-4 py-2 text-sm font-medium text-blue-700">
                        {"Sign in"}
                    </Link<Route>>
                }
            </div>
        </div>
    }
}
