use crate::guard::RequireAuth;
use crate::pages::{
    ApplicationPage, DashboardPage, HomePage, LoginPage, NotFoundPage, PaymentPage, RegisterPage,
    TasksPage,
};
use admissions_frontend_common::services::AuthApiService;
use admissions_frontend_common::{PortalProvider, use_is_authenticated, use_portal};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/dashboard")]
    Dashboard,
    #[at("/applications/:id/:step")]
    Application { id: String, step: String },
    #[at("/tasks")]
    Tasks,
    #[at("/payment/:id")]
    Payment { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Dashboard => html! { <RequireAuth><DashboardPage /></RequireAuth> },
        Route::Application { id, step } => html! {
            <RequireAuth><ApplicationPage {id} {step} /></RequireAuth>
        },
        Route::Tasks => html! { <RequireAuth><TasksPage /></RequireAuth> },
        Route::Payment { id } => html! { <RequireAuth><PaymentPage {id} /></RequireAuth> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <PortalProvider>
                <NavBar />
                <main class="max-w-4xl mx-auto px-4 py-8">
                    <Switch<Route> render={switch} />
                </main>
            </PortalProvider>
        </BrowserRouter>
    }
}

#[function_component(NavBar)]
fn nav_bar() -> Html {
    let portal = use_portal();
    let is_authenticated = use_is_authenticated();

    let on_logout = Callback::from(move |_: MouseEvent| {
        if let Some(portal) = portal.clone() {
            wasm_bindgen_futures::spawn_local(async move {
                AuthApiService::new(portal).logout().await;
            });
        }
    });

    html! {
        <nav class="bg-white border-b border-gray-200">
            <div class="max-w-4xl mx-auto px-4 flex justify-between h-16 items-center">
                <Link<Route> to={Route::Home} classes="text-xl font-bold text-blue-700">
                    {"Admissions Portal"}
                </Link<Route>>
                <div class="flex items-center gap-4 text-sm">
                    if is_authenticated {
                        <Link<Route> to={Route::Dashboard}>{"Dashboard"}</Link<Route>>
                        <Link<Route> to={Route::Tasks}>{"Tasks"}</Link<Route>>
                        <button onclick={on_logout} class="text-gray-600 hover:text-gray-900">
                            {"Sign Out"}
                        </button>
                    } else {
                        <Link<Route> to={Route::Login}>{"Sign In"}</Link<Route>>
                        <Link<Route> to={Route::Register}>{"Apply Now"}</Link<Route>>
                    }
                </div>
            </div>
        </nav>
    }
}
