//! Client env bootstrap from the loader payload

use crate::config::PortalConfig;
use crate::reload::page_origin;
use admissions_core::env::create_client_env;
use admissions_core::{ClientEnv, EnvPayload};
use admissions_http::PublicPortalClient;
use reqwest::Method;
use tracing::{debug, warn};

/// Fetch the loader payload and build the client env.
///
/// Any failure (no loader, network error, malformed JSON) falls back to the
/// hard-coded table.
pub async fn load_client_env() -> ClientEnv {
    match fetch_payload().await {
        Ok(payload) => {
            debug!("Loaded client env from loader");
            create_client_env(&payload)
        }
        Err(e) => {
            warn!(error = %e, "Loader env unavailable, using fallback values");
            ClientEnv::fallback()
        }
    }
}

async fn fetch_payload() -> Result<EnvPayload, admissions_http::ClientError> {
    let loader = PublicPortalClient::new(page_origin())?;
    let request = loader.request(Method::GET, PortalConfig::ENV_PAYLOAD_PATH);
    loader.execute(request).await
}
