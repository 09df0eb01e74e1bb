//! Sign-in, registration and sign-out
//!
//! Each successful call leaves the page, so the next load rebuilds the
//! [`PortalContext`](crate::PortalContext) with the new session.

use crate::PortalContext;
use crate::config::PortalConfig;
use crate::reload::navigate_to;
use admissions_http::ClientError;
use admissions_http::types::{AuthTokens, LoginRequest, RegisterRequest};
use tracing::{info, warn};

/// Authentication API service bound to a page snapshot
#[derive(Clone)]
pub struct AuthApiService {
    portal: PortalContext,
}

impl AuthApiService {
    pub const fn new(portal: PortalContext) -> Self {
        Self { portal }
    }

    /// Sign in and open the dashboard
    ///
    /// # Errors
    ///
    /// Returns the API error when the credentials are rejected or the request
    /// fails; the cookies are left untouched in that case
    pub async fn login(&self, email: String, password: String) -> Result<(), ClientError> {
        let tokens = self
            .portal
            .client()
            .public()
            .login(&LoginRequest { email, password })
            .await?;
        self.start_session(tokens)
    }

    /// Create an account and open the dashboard
    ///
    /// # Errors
    ///
    /// Returns the API error when registration is rejected or the request
    /// fails
    pub async fn register(&self, request: RegisterRequest) -> Result<(), ClientError> {
        let tokens = self.portal.client().public().register(&request).await?;
        self.start_session(tokens)
    }

    /// Revoke the refresh token (best effort), clear the cookies and go home
    pub async fn logout(&self) {
        if let (Some(client), Some(refresh_token)) = (
            self.portal.client().authenticated(),
            self.portal.store().refresh_token(),
        ) {
            if let Err(e) = client.logout(&refresh_token).await {
                warn!(error = %e, "Server-side logout failed");
            }
        }

        if let Err(e) = self.portal.store().clear_tokens() {
            warn!(error = %e, "Failed to clear session cookies");
        }
        info!("Signed out");
        navigate_to(PortalConfig::HOME_AFTER_LOGOUT);
    }

    fn start_session(&self, tokens: AuthTokens) -> Result<(), ClientError> {
        self.portal
            .store()
            .store(&tokens.into())
            .map_err(|e| ClientError::Configuration(e.to_string()))?;
        info!("Signed in");
        navigate_to(PortalConfig::HOME_AFTER_LOGIN);
        Ok(())
    }
}
