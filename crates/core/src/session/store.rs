//! Token store backed by session cookies

use super::cookies::{CookiePolicy, expire_cookie, parse_cookie_header, set_cookie};
use super::{
    ACCESS_TOKEN_COOKIE, CookieJar, REFRESH_TOKEN_COOKIE, SESSION_COOKIES, SessionTokens,
    USER_ID_COOKIE,
};
use crate::Result;
use tracing::debug;

/// Reads and writes the session cookies through a [`CookieJar`]
#[derive(Debug, Clone)]
pub struct TokenStore<J> {
    jar: J,
    policy: CookiePolicy,
}

impl<J: CookieJar> TokenStore<J> {
    /// Create a store with the default cookie policy
    pub fn new(jar: J) -> Self {
        Self::with_policy(jar, CookiePolicy::default())
    }

    /// Create a store with a custom cookie policy
    pub const fn with_policy(jar: J, policy: CookiePolicy) -> Self {
        Self { jar, policy }
    }

    /// The underlying jar
    pub const fn jar(&self) -> &J {
        &self.jar
    }

    /// Persist the access and refresh tokens
    ///
    /// # Errors
    ///
    /// Returns an error if the jar rejects either write
    pub fn set_tokens(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        self.jar.write(&set_cookie(
            ACCESS_TOKEN_COOKIE,
            access_token,
            self.policy.access_max_age,
            &self.policy,
        ))?;
        self.jar.write(&set_cookie(
            REFRESH_TOKEN_COOKIE,
            refresh_token,
            self.policy.refresh_max_age,
            &self.policy,
        ))?;
        debug!("Stored session tokens");
        Ok(())
    }

    /// Persist the signed-in student's id
    ///
    /// # Errors
    ///
    /// Returns an error if the jar rejects the write
    pub fn set_user_id(&self, user_id: &str) -> Result<()> {
        self.jar.write(&set_cookie(
            USER_ID_COOKIE,
            user_id,
            self.policy.refresh_max_age,
            &self.policy,
        ))
    }

    /// Persist a full set of session tokens
    ///
    /// # Errors
    ///
    /// Returns an error if the jar rejects any write
    pub fn store(&self, tokens: &SessionTokens) -> Result<()> {
        self.set_tokens(&tokens.access_token, &tokens.refresh_token)?;
        self.set_user_id(&tokens.user_id)
    }

    /// Expire all three session cookies immediately
    ///
    /// # Errors
    ///
    /// Returns an error if the jar rejects a write. Remaining cookies are
    /// still attempted.
    pub fn clear_tokens(&self) -> Result<()> {
        let mut first_error = None;
        for name in SESSION_COOKIES {
            if let Err(e) = self.jar.write(&expire_cookie(name, &self.policy)) {
                first_error.get_or_insert(e);
            }
        }
        debug!("Cleared session cookies");
        first_error.map_or(Ok(()), Err)
    }

    /// Expire the access token while keeping the refresh token, so the next
    /// page load goes through a refresh
    ///
    /// # Errors
    ///
    /// Returns an error if the jar rejects the write
    pub fn expire_access_token(&self) -> Result<()> {
        self.jar.write(&expire_cookie(ACCESS_TOKEN_COOKIE, &self.policy))
    }

    /// Synchronous read of a single cookie
    pub fn get_cookie(&self, name: &str) -> Option<String> {
        parse_cookie_header(&self.jar.cookie_header(), name)
    }

    /// Current access token, if any
    pub fn access_token(&self) -> Option<String> {
        self.get_cookie(ACCESS_TOKEN_COOKIE).filter(|token| !token.is_empty())
    }

    /// Current refresh token, if any
    pub fn refresh_token(&self) -> Option<String> {
        self.get_cookie(REFRESH_TOKEN_COOKIE).filter(|token| !token.is_empty())
    }

    /// Current user id, if any
    pub fn user_id(&self) -> Option<String> {
        self.get_cookie(USER_ID_COOKIE).filter(|id| !id.is_empty())
    }

    /// Snapshot of the session, present only when authenticated
    pub fn tokens(&self) -> Option<SessionTokens> {
        let header = self.jar.cookie_header();
        let access_token = parse_cookie_header(&header, ACCESS_TOKEN_COOKIE)
            .filter(|token| !token.is_empty())?;

        Some(SessionTokens {
            access_token,
            refresh_token: parse_cookie_header(&header, REFRESH_TOKEN_COOKIE).unwrap_or_default(),
            user_id: parse_cookie_header(&header, USER_ID_COOKIE).unwrap_or_default(),
        })
    }

    /// Whether a non-empty access token is stored
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}
