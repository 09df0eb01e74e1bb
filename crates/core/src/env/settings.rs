//! Server env loading through the `config` crate

use super::{EnvSource, Secret, SecretStore, ServerEnv, create_server_env};
use crate::Result;
use config::{Config, Environment, File};
use std::path::Path;

/// Environment values layered from an optional TOML file and the process
/// environment. Process variables win over the file.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    config: Config,
}

impl ConfigSource {
    /// Load the layered configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        let config = builder
            .add_source(Environment::default().try_parsing(false))
            .build()?;

        Ok(Self { config })
    }

    fn lookup(&self, key: &str) -> Option<String> {
        // Environment keys are case-folded by `config`, file keys may not be
        self.config
            .get_string(key)
            .or_else(|_| self.config.get_string(&key.to_lowercase()))
            .ok()
            .filter(|value| !value.is_empty())
    }
}

impl EnvSource for ConfigSource {
    fn var(&self, key: &str) -> Option<String> {
        self.lookup(key)
    }
}

impl SecretStore for ConfigSource {
    fn secret(&self, key: &str) -> Option<Secret> {
        self.lookup(key).map(Secret::new)
    }
}

impl ServerEnv {
    /// Load the server env from `path` and the process environment, with
    /// credentials resolved through `secrets`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be parsed
    pub fn load(path: Option<&Path>, secrets: &impl SecretStore) -> Result<Self> {
        let source = ConfigSource::load(path)?;
        tracing::info!(path = ?path, "Loaded server environment");
        Ok(create_server_env(&source, secrets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AWS_SECRET_ACCESS_KEY, S3_BUCKET, StaticSecrets};
    use std::io::Write;

    #[test]
    fn test_load_reads_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "REMIX_PUBLIC_S3_BUCKET = \"bucket-from-file\"").unwrap();

        let env = ServerEnv::load(Some(file.path()), &StaticSecrets::default()).unwrap();
        assert_eq!(env.get(S3_BUCKET), Some("bucket-from-file"));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let env = ServerEnv::load(Some(&path), &StaticSecrets::default()).unwrap();
        assert!(env.client_env().api_base_url().starts_with("https://"));
    }

    #[test]
    fn test_file_credentials_only_reach_server_env_through_secret_store() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "AWS_SECRET_ACCESS_KEY = \"file-secret\"").unwrap();

        let source = ConfigSource::load(Some(file.path())).unwrap();
        let env = create_server_env(&source, &source);

        assert_eq!(env.get(AWS_SECRET_ACCESS_KEY), Some("file-secret"));
        assert_eq!(env.client_env().raw(AWS_SECRET_ACCESS_KEY), None);
    }
}
