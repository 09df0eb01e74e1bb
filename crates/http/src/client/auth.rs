//! Authentication API client methods

use super::{AuthenticatedPortalClient, ClientError, PublicPortalClient};
use crate::types::{AuthTokens, LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest};
use reqwest::Method;
use serde::de::IgnoredAny;

impl PublicPortalClient {
    /// Sign in with email and password
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthTokens, ClientError> {
        let req = self.request(Method::POST, "/auth/login").json(request);
        self.execute(req).await
    }

    /// Create an applicant account
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthTokens, ClientError> {
        let req = self.request(Method::POST, "/auth/register").json(request);
        self.execute(req).await
    }

    /// Exchange a refresh token for a fresh token pair
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, ClientError> {
        let req = self
            .request(Method::POST, "/auth/refresh")
            .json(&RefreshRequest {
                refresh_token: refresh_token.to_string(),
            });
        self.execute(req).await
    }
}

impl AuthenticatedPortalClient {
    /// Revoke the refresh token on the server
    pub async fn logout(&self, refresh_token: &str) -> Result<(), ClientError> {
        let req = self
            .request(Method::POST, "/auth/logout")
            .json(&LogoutRequest {
                refresh_token: refresh_token.to_string(),
            });
        // Any success body is accepted and discarded
        let _: IgnoredAny = self.execute(req).await?;
        Ok(())
    }
}
