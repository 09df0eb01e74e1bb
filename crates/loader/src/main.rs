mod telemetry;

use admissions_core::ServerEnv;
use admissions_core::env::ProcessEnvSecrets;
use admissions_http::loader::{LoaderState, router};
use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

/// Admissions portal loader: serves the frontend and its client environment
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short = 'c', long = "config", env = "ADMISSIONS_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short = 'b', long = "bind", env = "ADMISSIONS_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Directory with the compiled frontend
    #[arg(long = "static-dir", env = "ADMISSIONS_STATIC_DIR")]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env before clap so its values can fill `env = ...` arguments
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    telemetry::init_tracing(telemetry::DEFAULT_LOG_FILTER)?;

    let env = ServerEnv::load(cli.config.as_deref(), &ProcessEnvSecrets)
        .context("Failed to load server environment")?;
    info!(
        keys = ?env.keys().collect::<Vec<_>>(),
        api = env.client_env().api_base_url(),
        "Server environment ready"
    );

    let app = router(LoaderState::new(env), cli.static_dir.clone());
    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;

    info!(
        address = %cli.bind,
        static_dir = ?cli.static_dir,
        "Loader listening"
    );
    println!("Server running at: http://{}/", cli.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Loader stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received shutdown signal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["admissions-loader"]).unwrap();
        assert_eq!(cli.bind, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "admissions-loader",
            "--config",
            "loader.toml",
            "--bind",
            "0.0.0.0:8080",
            "--static-dir",
            "dist",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("loader.toml")));
        assert_eq!(cli.bind.port(), 8080);
        assert_eq!(cli.static_dir, Some(PathBuf::from("dist")));
    }
}
