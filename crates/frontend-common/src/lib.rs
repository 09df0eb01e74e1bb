//! Browser side of the admissions portal session layer
//!
//! One call to [`bootstrap::initialize_portal`] per page load produces the
//! immutable snapshot behind [`PortalContext`]: the client env, the restored session and a
//! client in the matching auth state. [`PortalProvider`] runs it and hands the
//! snapshot to the component tree.

pub mod auth;
pub mod bootstrap;
pub mod client;
pub mod components;
pub mod config;
pub mod cookie_jar;
pub mod env;
pub mod logging;
pub mod reload;
pub mod services;

pub use auth::context::{
    PortalContext, PortalProvider, use_client, use_env, use_is_authenticated, use_portal,
    use_session,
};
pub use components::{ErrorBanner, Spinner};
pub use cookie_jar::DocumentCookieJar;
pub use reload::PageReloader;
