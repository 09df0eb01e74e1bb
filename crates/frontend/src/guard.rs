//! Authentication guard for protected routes

use crate::app::Route;
use admissions_frontend_common::use_is_authenticated;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    pub children: Children,
}

/// Renders children for a signed-in student, otherwise redirects to login
#[function_component(RequireAuth)]
pub fn require_auth(props: &RequireAuthProps) -> Html {
    if use_is_authenticated() {
        html! { <>{ props.children.clone() }</> }
    } else {
        html! { <Redirect<Route> to={Route::Login} /> }
    }
}
