//! Admissions REST client
//!
//! [`PublicPortalClient`] reaches the unauthenticated endpoints (login,
//! registration, token refresh). [`AuthenticatedPortalClient`] attaches the
//! bearer access token and hands 401 responses to an
//! [`UnauthorizedHandler`]. [`PortalClient`] picks between the two from the
//! current session.

pub mod auth;
pub mod bootstrap;
pub mod error;
pub mod student;
pub mod typed;
pub mod unauthorized;

pub use bootstrap::{SessionState, bootstrap_session};
pub use error::ClientError;
pub use typed::{AuthenticatedPortalClient, PortalClient, PublicPortalClient, TypedClientBuilder};
pub use unauthorized::{LogUnauthorized, UnauthorizedHandler};
