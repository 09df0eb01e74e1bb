//! Type-safe API clients that enforce authentication requirements at compile time

use super::ClientError;
use super::unauthorized::{LogUnauthorized, UnauthorizedHandler};
use admissions_core::SessionTokens;
use reqwest::{Client, ClientBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("admissions-portal/", env!("CARGO_PKG_VERSION"));

/// Client for public endpoints that don't require authentication
#[derive(Clone)]
pub struct PublicPortalClient {
    client: Client,
    base_url: String,
}

/// Client that attaches the bearer access token to every request.
///
/// Starts out authenticated. The first 401 moves it to the unauthenticated
/// state: later requests go out without the header, and every 401 calls the
/// configured [`UnauthorizedHandler`] exactly once.
#[derive(Clone)]
pub struct AuthenticatedPortalClient {
    client: Client,
    base_url: String,
    access_token: String,
    expired: Arc<AtomicBool>,
    on_unauthorized: Arc<dyn UnauthorizedHandler>,
}

fn build_http_client(timeout: Option<Duration>) -> Result<Client, ClientError> {
    #[cfg(not(target_arch = "wasm32"))]
    let client = {
        let mut builder = ClientBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()?
    };

    #[cfg(target_arch = "wasm32")]
    let client = {
        let _ = timeout; // Timeouts not supported on WASM
        ClientBuilder::new().user_agent(USER_AGENT).build()?
    };

    Ok(client)
}

/// Decode a JSON response, mapping non-2xx statuses to [`ClientError`].
/// An empty success body decodes as JSON `null`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let url = response.url().path().to_string();

    if status.is_success() {
        let body = response.text().await?;
        let body = if body.trim().is_empty() { "null" } else { &body };
        Ok(serde_json::from_str(body)?)
    } else {
        let body = response.text().await.unwrap_or_default();
        let error = ClientError::from_status(status, &body);
        warn!(%status, path = %url, error = %error, "API request failed");
        Err(error)
    }
}

impl PublicPortalClient {
    /// Create a new public client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::new_with_timeout(base_url, None)
    }

    fn new_with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = build_http_client(timeout)?;
        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        read_json(response).await
    }

    /// Authenticate with an access token to get an authenticated client
    pub fn authenticate(
        self,
        access_token: impl Into<String>,
        on_unauthorized: Arc<dyn UnauthorizedHandler>,
    ) -> AuthenticatedPortalClient {
        AuthenticatedPortalClient {
            client: self.client,
            base_url: self.base_url,
            access_token: access_token.into(),
            expired: Arc::new(AtomicBool::new(false)),
            on_unauthorized,
        }
    }
}

impl AuthenticatedPortalClient {
    /// Create a new authenticated client that only logs on 401
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Ok(PublicPortalClient::new(base_url)?.authenticate(access_token, Arc::new(LogUnauthorized)))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the bearer token is still attached to new requests
    pub fn is_authenticated(&self) -> bool {
        !self.expired.load(Ordering::Acquire)
    }

    /// Create a request builder, with the bearer header while authenticated
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.request(method, url);
        if self.is_authenticated() {
            request.header(header::AUTHORIZATION, format!("Bearer {}", self.access_token))
        } else {
            request
        }
    }

    /// Execute a request. A 401 marks the session expired, calls the
    /// unauthorized handler once and returns [`ClientError::SessionExpired`].
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let was_authenticated = !self.expired.swap(true, Ordering::AcqRel);
            warn!(
                path = %response.url().path(),
                was_authenticated,
                "Access token rejected, reloading session"
            );
            self.on_unauthorized.on_unauthorized();
            return Err(ClientError::SessionExpired);
        }

        read_json(response).await
    }

    /// Plain HTTP client without auth, for absolute URLs such as pre-signed
    /// upload targets
    pub(super) const fn http_client(&self) -> &Client {
        &self.client
    }

    /// Create a public client (useful for calling public endpoints)
    pub fn to_public(&self) -> PublicPortalClient {
        PublicPortalClient {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

/// The two client states the portal can be in
#[derive(Clone)]
pub enum PortalClient {
    /// No access token; only public endpoints are reachable
    Unauthenticated(PublicPortalClient),
    /// Bearer token attached to requests
    Authenticated(AuthenticatedPortalClient),
}

impl PortalClient {
    /// Build the client matching the current session
    pub fn from_session(
        builder: TypedClientBuilder,
        session: Option<&SessionTokens>,
    ) -> Result<Self, ClientError> {
        match session.filter(|tokens| tokens.is_authenticated()) {
            Some(tokens) => {
                debug!(user_id = %tokens.user_id, "Building authenticated client");
                Ok(Self::Authenticated(builder.build_authenticated(&tokens.access_token)?))
            }
            None => Ok(Self::Unauthenticated(builder.build_public()?)),
        }
    }

    /// Client for public endpoints
    pub fn public(&self) -> PublicPortalClient {
        match self {
            Self::Unauthenticated(client) => client.clone(),
            Self::Authenticated(client) => client.to_public(),
        }
    }

    /// The authenticated client, if the session is still live
    pub fn authenticated(&self) -> Option<&AuthenticatedPortalClient> {
        match self {
            Self::Authenticated(client) if client.is_authenticated() => Some(client),
            _ => None,
        }
    }

    /// Whether requests currently carry a bearer token
    pub fn is_authenticated(&self) -> bool {
        self.authenticated().is_some()
    }
}

/// Type-safe builder that creates the appropriate client type
#[derive(Clone)]
pub struct TypedClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    on_unauthorized: Arc<dyn UnauthorizedHandler>,
}

impl TypedClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            on_unauthorized: Arc::new(LogUnauthorized),
        }
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the reaction to a rejected access token
    pub fn on_unauthorized(mut self, handler: Arc<dyn UnauthorizedHandler>) -> Self {
        self.on_unauthorized = handler;
        self
    }

    /// Build a public client
    pub fn build_public(self) -> Result<PublicPortalClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        PublicPortalClient::new_with_timeout(base_url, self.timeout)
    }

    /// Build an authenticated client
    pub fn build_authenticated(
        self,
        access_token: impl Into<String>,
    ) -> Result<AuthenticatedPortalClient, ClientError> {
        let on_unauthorized = self.on_unauthorized.clone();
        Ok(self.build_public()?.authenticate(access_token, on_unauthorized))
    }
}

impl Default for TypedClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
