//! Frontend configuration

/// Session bootstrap configuration
pub struct PortalConfig;

impl PortalConfig {
    /// Loader endpoint serving the client env, relative to the page origin
    pub const ENV_PAYLOAD_PATH: &'static str = "/api/env";

    /// Where to send the student after signing in
    pub const HOME_AFTER_LOGIN: &'static str = "/dashboard";

    /// Where to send the visitor after signing out
    pub const HOME_AFTER_LOGOUT: &'static str = "/";
}
