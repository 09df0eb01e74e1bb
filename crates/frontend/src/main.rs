mod app;
mod guard;
mod pages;

use app::App;
use tracing::Level;

fn main() {
    admissions_frontend_common::logging::init(Level::DEBUG);
    yew::Renderer::<App>::new().render();
}
