//! Cookie jar seam

use crate::Result;
use cookie::Cookie;
use cookie::time::{Duration, OffsetDateTime};
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

/// Storage with `document.cookie` semantics.
///
/// Reads return every visible cookie as one `name=value; ...` string. Writes
/// take a single `Set-Cookie` formatted string and are last-write-wins.
pub trait CookieJar {
    /// Current cookie header
    fn cookie_header(&self) -> String;

    /// Apply one `Set-Cookie` formatted write
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage rejects the write
    fn write(&self, set_cookie: &str) -> Result<()>;
}

impl<J: CookieJar + ?Sized> CookieJar for &J {
    fn cookie_header(&self) -> String {
        (**self).cookie_header()
    }

    fn write(&self, set_cookie: &str) -> Result<()> {
        (**self).write(set_cookie)
    }
}

impl<J: CookieJar + ?Sized> CookieJar for std::sync::Arc<J> {
    fn cookie_header(&self) -> String {
        (**self).cookie_header()
    }

    fn write(&self, set_cookie: &str) -> Result<()> {
        (**self).write(set_cookie)
    }
}

impl<J: CookieJar + ?Sized> CookieJar for std::rc::Rc<J> {
    fn cookie_header(&self) -> String {
        (**self).cookie_header()
    }

    fn write(&self, set_cookie: &str) -> Result<()> {
        (**self).write(set_cookie)
    }
}

/// In-memory jar that mimics how a browser applies cookie writes.
///
/// A write with `Max-Age <= 0` or an `Expires` at or before the epoch
/// removes the cookie; any other write replaces its value.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: Mutex<BTreeMap<String, String>>,
}

impl MemoryCookieJar {
    /// Create an empty jar
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live cookies
    pub fn len(&self) -> usize {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the jar holds no cookies
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CookieJar for MemoryCookieJar {
    fn cookie_header(&self) -> String {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, set_cookie: &str) -> Result<()> {
        let parsed = Cookie::parse(set_cookie)
            .map_err(|e| crate::Error::InvalidCookie(format!("{set_cookie}: {e}")))?;

        let expired = parsed.max_age().is_some_and(|age| age <= Duration::ZERO)
            || parsed
                .expires_datetime()
                .is_some_and(|at| at <= OffsetDateTime::UNIX_EPOCH);

        let mut cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        if expired {
            cookies.remove(parsed.name());
        } else {
            cookies.insert(parsed.name().to_string(), parsed.value().to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let jar = MemoryCookieJar::new();
        jar.write("a=1; Path=/").unwrap();
        jar.write("b=2; Path=/; Max-Age=60").unwrap();

        assert_eq!(jar.cookie_header(), "a=1; b=2");
    }

    #[test]
    fn test_last_write_wins() {
        let jar = MemoryCookieJar::new();
        jar.write("a=1").unwrap();
        jar.write("a=2").unwrap();

        assert_eq!(jar.cookie_header(), "a=2");
        assert_eq!(jar.len(), 1);
    }

    #[test]
    fn test_expired_write_removes_cookie() {
        let jar = MemoryCookieJar::new();
        jar.write("a=1").unwrap();
        jar.write("a=; Max-Age=0").unwrap();
        assert!(jar.is_empty());

        jar.write("b=1").unwrap();
        jar.write("b=; Expires=Thu, 01 Jan 1970 00:00:00 GMT").unwrap();
        assert!(jar.is_empty());
    }

    #[test]
    fn test_rejects_garbage() {
        let jar = MemoryCookieJar::new();
        assert!(jar.write("").is_err());
    }
}
