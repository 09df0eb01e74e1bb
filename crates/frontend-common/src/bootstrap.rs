//! Root-level initialization, once per page load

use crate::client::client_builder;
use crate::cookie_jar::DocumentCookieJar;
use crate::env::load_client_env;
use crate::reload::is_secure_context;
use admissions_core::{ClientEnv, CookiePolicy, SessionTokens, TokenStore};
use admissions_http::client::{SessionState, bootstrap_session};
use admissions_http::{ClientError, PortalClient};
use tracing::info;

/// Token store over the page's cookies
pub type BrowserTokenStore = TokenStore<DocumentCookieJar>;

/// Everything a view needs, fixed for the lifetime of the page
pub struct PortalSnapshot {
    pub env: ClientEnv,
    pub session: SessionState,
    pub client: PortalClient,
    pub store: BrowserTokenStore,
}

impl PortalSnapshot {
    /// Tokens of the restored session
    pub const fn tokens(&self) -> Option<&SessionTokens> {
        self.session.tokens()
    }
}

/// Cookie policy for this page: `Secure` when served over HTTPS
pub fn page_cookie_policy() -> CookiePolicy {
    if is_secure_context() {
        CookiePolicy::secure()
    } else {
        CookiePolicy::default()
    }
}

/// Load the env, restore the session and build the matching client
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed
pub async fn initialize_portal() -> Result<PortalSnapshot, ClientError> {
    let env = load_client_env().await;
    let policy = page_cookie_policy();
    let store = TokenStore::with_policy(DocumentCookieJar, policy.clone());
    let builder = client_builder(&env, &policy);

    let public = builder.clone().build_public()?;
    let session = bootstrap_session(&store, &public).await;
    let client = PortalClient::from_session(builder, session.tokens())?;

    info!(
        api = env.api_base_url(),
        authenticated = client.is_authenticated(),
        "Portal initialized"
    );

    Ok(PortalSnapshot {
        env,
        session,
        client,
        store,
    })
}
