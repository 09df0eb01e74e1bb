//! Session tokens and their cookie storage

mod cookies;
mod jar;
mod store;

pub use cookies::{CookiePolicy, expire_cookie, parse_cookie_header, set_cookie};
pub use jar::{CookieJar, MemoryCookieJar};
pub use store::TokenStore;

use serde::{Deserialize, Serialize};

/// Cookie holding the bearer access token
pub const ACCESS_TOKEN_COOKIE: &str = "access-token";
/// Cookie holding the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh-token";
/// Cookie holding the signed-in student's id
pub const USER_ID_COOKIE: &str = "user-id";

/// All cookies that make up a session
pub const SESSION_COOKIES: [&str; 3] = [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, USER_ID_COOKIE];

/// Tokens identifying the signed-in student.
///
/// No signature or expiry validation happens on the client; a non-empty
/// access token is all it takes to count as authenticated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
}

impl SessionTokens {
    /// Whether these tokens count as an authenticated session
    pub const fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }
}
