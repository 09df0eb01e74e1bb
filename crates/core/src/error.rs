//! Error types shared by the core crate

use thiserror::Error;

/// Standard result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types
#[derive(Debug, Error)]
pub enum Error {
    /// The cookie jar refused a write
    #[error("Cookie write failed: {0}")]
    CookieWrite(String),

    /// A cookie string could not be parsed
    #[error("Invalid cookie: {0}")]
    InvalidCookie(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration source could not be loaded
    #[cfg(feature = "settings")]
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// Create a cookie write error
    pub fn cookie_write(message: impl Into<String>) -> Self {
        Self::CookieWrite(message.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
