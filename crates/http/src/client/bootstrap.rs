//! Session bootstrap, run once per page load

use super::{ClientError, PublicPortalClient};
use admissions_core::{CookieJar, SessionTokens, TokenStore};
use tracing::{debug, info, warn};

/// Outcome of the page-load bootstrap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// A usable access token is stored
    Authenticated(SessionTokens),
    /// No session; only public pages are usable
    Unauthenticated,
}

impl SessionState {
    /// Tokens of an authenticated session
    pub const fn tokens(&self) -> Option<&SessionTokens> {
        match self {
            Self::Authenticated(tokens) => Some(tokens),
            Self::Unauthenticated => None,
        }
    }
}

/// Restore the session from cookies.
///
/// 1. An access token cookie means authenticated, as-is.
/// 2. Otherwise a refresh token cookie is exchanged for a new pair, which is
///    written back to the cookies.
/// 3. Otherwise the visitor is unauthenticated.
///
/// A refresh rejected by the API, or one that issues an empty access token,
/// clears every session cookie. Network and server failures leave the cookies
/// alone so the next load can try again.
pub async fn bootstrap_session<J: CookieJar>(
    store: &TokenStore<J>,
    client: &PublicPortalClient,
) -> SessionState {
    if let Some(tokens) = store.tokens() {
        debug!("Session restored from access token cookie");
        return SessionState::Authenticated(tokens);
    }

    let Some(refresh_token) = store.refresh_token() else {
        debug!("No session cookies found");
        return SessionState::Unauthenticated;
    };

    match client.refresh(&refresh_token).await {
        Ok(issued) if issued.access_token.is_empty() => {
            warn!("Refresh returned no access token, clearing session");
            if let Err(e) = store.clear_tokens() {
                warn!(error = %e, "Failed to clear session cookies");
            }
            SessionState::Unauthenticated
        }
        Ok(issued) => {
            let mut tokens: SessionTokens = issued.into();
            if tokens.user_id.is_empty() {
                tokens.user_id = store.user_id().unwrap_or_default();
            }
            if let Err(e) = store.store(&tokens) {
                warn!(error = %e, "Failed to persist refreshed tokens");
            }
            info!("Session refreshed");
            SessionState::Authenticated(tokens)
        }
        Err(e) if rejects_refresh_token(&e) => {
            info!(error = %e, "Refresh token rejected, clearing session");
            if let Err(e) = store.clear_tokens() {
                warn!(error = %e, "Failed to clear session cookies");
            }
            SessionState::Unauthenticated
        }
        Err(e) => {
            warn!(error = %e, "Session refresh failed");
            SessionState::Unauthenticated
        }
    }
}

const fn rejects_refresh_token(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::AuthenticationFailed(_)
            | ClientError::Forbidden(_)
            | ClientError::BadRequest(_)
            | ClientError::NotFound(_)
    )
}
