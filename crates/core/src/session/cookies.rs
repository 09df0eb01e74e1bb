//! Cookie string encoding
//!
//! Session cookies are string values written through a
//! `document.cookie`-style interface: one `Set-Cookie` formatted string per
//! write, and a single `name=value; name2=value2` string for reads. Values are
//! percent-encoded on write and decoded on read, so any string round-trips.

use cookie::time::{Duration, OffsetDateTime};
use cookie::{Cookie, SameSite};

/// Attributes applied to every session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePolicy {
    /// Cookie path
    pub path: String,
    /// Only send over HTTPS
    pub secure: bool,
    /// Lifetime of the access token cookie
    pub access_max_age: Duration,
    /// Lifetime of the refresh token and user id cookies
    pub refresh_max_age: Duration,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            secure: false,
            access_max_age: Duration::days(1),
            refresh_max_age: Duration::days(30),
        }
    }
}

impl CookiePolicy {
    /// Policy for HTTPS deployments
    pub fn secure() -> Self {
        Self {
            secure: true,
            ..Self::default()
        }
    }
}

/// Encode a cookie write for `name=value` that lives for `max_age`
pub fn set_cookie(name: &str, value: &str, max_age: Duration, policy: &CookiePolicy) -> String {
    Cookie::build((name.to_string(), value.to_string()))
        .path(policy.path.clone())
        .same_site(SameSite::Lax)
        .secure(policy.secure)
        .max_age(max_age)
        .build()
        .encoded()
        .to_string()
}

/// Encode a cookie write that removes `name` immediately
pub fn expire_cookie(name: &str, policy: &CookiePolicy) -> String {
    Cookie::build((name.to_string(), String::new()))
        .path(policy.path.clone())
        .same_site(SameSite::Lax)
        .secure(policy.secure)
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
        .encoded()
        .to_string()
}

/// Find the decoded value of `name` in a `document.cookie` style header.
///
/// Malformed pairs are skipped; the first match wins.
pub fn parse_cookie_header(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse_encoded(header)
        .filter_map(std::result::Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}
