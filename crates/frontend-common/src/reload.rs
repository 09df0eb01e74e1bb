//! Page navigation and the 401 reload handler

use crate::cookie_jar::DocumentCookieJar;
use admissions_core::{CookiePolicy, TokenStore};
use admissions_http::UnauthorizedHandler;
use tracing::{error, warn};

/// Reload the current page, re-running the bootstrap
pub fn reload_page() {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().reload() {
        error!(error = ?e, "Page reload failed");
    }
}

/// Full page navigation to `path`, re-running the bootstrap
pub fn navigate_to(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().assign(path) {
        error!(error = ?e, path, "Navigation failed");
    }
}

/// Origin of the current page, or an empty string outside a browser
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

/// Whether the page was served over HTTPS
pub fn is_secure_context() -> bool {
    web_sys::window()
        .and_then(|window| window.location().protocol().ok())
        .is_some_and(|protocol| protocol == "https:")
}

/// Reacts to a rejected access token with a full page reload.
///
/// The access cookie is expired first so the reload goes through the
/// refresh path of the bootstrap instead of reusing the rejected token.
#[derive(Debug, Clone, Default)]
pub struct PageReloader {
    policy: CookiePolicy,
}

impl PageReloader {
    /// Reloader writing cookies with `policy`
    pub const fn new(policy: CookiePolicy) -> Self {
        Self { policy }
    }
}

impl UnauthorizedHandler for PageReloader {
    fn on_unauthorized(&self) {
        let store = TokenStore::with_policy(DocumentCookieJar, self.policy.clone());
        if let Err(e) = store.expire_access_token() {
            warn!(error = %e, "Could not expire access token before reload");
        }
        reload_page();
    }
}
