//! Admissions HTTP layer
//!
//! The [`client`] module is the typed REST client used by the browser. With
//! the `server` feature the crate also provides the [`loader`] router, which
//! hands the client-safe environment to the page before it renders.

pub mod client;
pub mod types;

#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod loader;

pub use client::{
    AuthenticatedPortalClient, ClientError, PortalClient, PublicPortalClient, TypedClientBuilder,
    UnauthorizedHandler,
};

#[cfg(feature = "server")]
pub use error::{HttpError, Result};
