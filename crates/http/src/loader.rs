//! Loader routes
//!
//! Before the frontend renders it fetches `/api/env` to learn the
//! client-safe environment. Only keys from the client allow-list are ever
//! served; credentials held by the [`ServerEnv`] stay in this process.

use crate::error::{HttpError, Result};
use admissions_core::{ClientEnv, ServerEnv, env::CLIENT_KEYS};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Shared loader state
#[derive(Debug, Clone)]
pub struct LoaderState {
    env: Arc<ServerEnv>,
}

impl LoaderState {
    /// Wrap a loaded server env
    pub fn new(env: ServerEnv) -> Self {
        Self { env: Arc::new(env) }
    }

    /// The full server env
    pub fn env(&self) -> &ServerEnv {
        &self.env
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Single env value response
#[derive(Debug, Serialize, Deserialize)]
pub struct EnvValueResponse {
    pub key: String,
    pub value: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Client env payload, `null` for unset keys
pub async fn client_env(State(state): State<LoaderState>) -> Json<ClientEnv> {
    Json(state.env.client_env().clone())
}

/// One client env value with fallback applied
pub async fn client_env_value(
    State(state): State<LoaderState>,
    Path(key): Path<String>,
) -> Result<Json<EnvValueResponse>> {
    if !CLIENT_KEYS.contains(&key.as_str()) {
        debug!(%key, "Refusing to serve non-client env key");
        return Err(HttpError::NotFound(format!("env key {key}")));
    }

    let value = state.env.client_env().get(&key).map(str::to_string);
    Ok(Json(EnvValueResponse { key, value }))
}

/// Build the loader router. With `static_dir`, unknown paths serve the
/// compiled frontend and fall back to its `index.html`.
pub fn router(state: LoaderState, static_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/api/env", get(client_env))
        .route("/api/env/{key}", get(client_env_value))
        .with_state(state);

    if let Some(static_dir) = static_dir {
        debug!(dir = %static_dir.display(), "Serving static frontend");
        let index = static_dir.join("index.html");
        let serve_dir = ServeDir::new(&static_dir).fallback(ServeFile::new(index));
        app = app.fallback_service(serve_dir);
    }

    app.layer(TraceLayer::new_for_http())
}
