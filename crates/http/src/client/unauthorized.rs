//! Reaction to a rejected bearer token

/// Called once for every authenticated request that comes back with 401.
///
/// In the browser this forces a full page reload so the session is
/// re-bootstrapped from cookies. There is no retry or request queuing.
pub trait UnauthorizedHandler: Send + Sync {
    /// The server rejected the current access token
    fn on_unauthorized(&self);
}

impl<F> UnauthorizedHandler for F
where
    F: Fn() + Send + Sync,
{
    fn on_unauthorized(&self) {
        self();
    }
}

/// Handler used when none is configured: only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogUnauthorized;

impl UnauthorizedHandler for LogUnauthorized {
    fn on_unauthorized(&self) {
        tracing::warn!("Access token rejected and no unauthorized handler configured");
    }
}
