use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="text-center py-16">
            <h1 class="text-2xl font-bold text-gray-900">{"Page not found"}</h1>
            <Link<Route> to={Route::Home} classes="mt-4 inline-block text-blue-700">
                {"Back to the portal"}
            </Link<Route>>
        </div>
    }
}
