//! Admissions portal core: environment configuration and session tokens
//!
//! Everything in this crate is free of browser and network dependencies so it
//! can be shared by the wasm frontend, the HTTP client and the loader server.

pub mod env;
pub mod error;
pub mod session;

pub use env::{ClientEnv, EnvPayload, EnvSource, ProcessEnv, SecretStore, ServerEnv};
pub use error::{Error, Result};
pub use session::{CookieJar, CookiePolicy, MemoryCookieJar, SessionTokens, TokenStore};
