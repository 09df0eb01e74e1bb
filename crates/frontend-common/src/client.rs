//! Client construction for the current page load

use crate::reload::PageReloader;
use admissions_core::{ClientEnv, CookiePolicy};
use admissions_http::TypedClientBuilder;
use std::sync::Arc;

/// Builder pointed at the API from `env`, reloading the page on 401
pub fn client_builder(env: &ClientEnv, policy: &CookiePolicy) -> TypedClientBuilder {
    TypedClientBuilder::new()
        .base_url(env.api_base_url())
        .on_unauthorized(Arc::new(PageReloader::new(policy.clone())))
}
