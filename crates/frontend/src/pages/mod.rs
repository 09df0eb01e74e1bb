mod application;
mod dashboard;
mod home;
mod login;
mod not_found;
mod payment;
mod register;
mod tasks;

pub use application::ApplicationPage;
pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use payment::PaymentPage;
pub use register::RegisterPage;
pub use tasks::TasksPage;

use admissions_frontend_common::{use_portal, use_session};
use admissions_http::AuthenticatedPortalClient;
use yew::prelude::*;

/// Data fetched when a page mounts
#[derive(Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

/// Authenticated client and student id of the page load
#[hook]
pub fn use_student() -> Option<(AuthenticatedPortalClient, String)> {
    let portal = use_portal();
    let session = use_session();

    let client = portal.and_then(|portal| portal.client().authenticated().cloned());
    let student_id = session
        .map(|tokens| tokens.user_id)
        .filter(|id| !id.is_empty());
    client.zip(student_id)
}

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500";
const BUTTON_CLASS: &str = "px-4 py-2 text-sm font-medium text-white bg-blue-600 hover:bg-blue-700 rounded-md disabled:opacity-50";
