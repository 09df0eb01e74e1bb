//! Environment configuration store
//!
//! Environment values reach the portal in two shapes:
//!
//! - the **client env**, a fixed allow-list of public keys that the loader
//!   serialises into the page and the browser reads once per page load
//! - the **server env**, the client keys plus credentials that only the
//!   loader process may hold
//!
//! Both are built from an [`EnvSource`]. Public keys fall back to a
//! hard-coded table when the source has no value. Credentials never have a
//! fallback and only come from a [`SecretStore`].

mod secrets;
#[cfg(feature = "settings")]
mod settings;

pub use secrets::{ProcessEnvSecrets, Secret, SecretStore, StaticSecrets};
#[cfg(feature = "settings")]
pub use settings::ConfigSource;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Base URL of the admissions REST API
pub const API_BASE_URL: &str = "REMIX_PUBLIC_API_BASE_URL";
/// Region of the applicant document bucket
pub const AWS_REGION: &str = "REMIX_PUBLIC_AWS_REGION";
/// Name of the applicant document bucket
pub const S3_BUCKET: &str = "REMIX_PUBLIC_S3_BUCKET";
/// AWS access key id (server only)
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// AWS secret access key (server only)
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// Keys that are safe to expose to the browser
pub const CLIENT_KEYS: &[&str] = &[API_BASE_URL, AWS_REGION, S3_BUCKET];

/// Keys that must never leave the server
pub const SECRET_KEYS: &[&str] = &[AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY];

/// Hard-coded defaults used when the canonical source is unavailable.
/// Credentials have no fallback.
const FALLBACK_VALUES: &[(&str, &str)] = &[
    (API_BASE_URL, "https://api.admissions.example.edu/v1"),
    (AWS_REGION, "us-east-1"),
    (S3_BUCKET, "admissions-applicant-uploads"),
];

/// Return the hard-coded default for `key`, if it has one
pub fn fallback_value(key: &str) -> Option<&'static str> {
    FALLBACK_VALUES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

/// A source of raw environment values
pub trait EnvSource {
    /// Look up a single key. Empty strings count as unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|value| !value.is_empty())
    }
}

/// Loader-provided environment payload, as embedded in the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvPayload(BTreeMap<String, Option<String>>);

impl EnvPayload {
    /// Build a payload from key/value pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), Some(value.into())))
                .collect(),
        )
    }
}

impl EnvSource for EnvPayload {
    fn var(&self, key: &str) -> Option<String> {
        self.0
            .get(key)
            .cloned()
            .flatten()
            .filter(|value| !value.is_empty())
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

impl<S: EnvSource> EnvSource for Option<S> {
    fn var(&self, key: &str) -> Option<String> {
        self.as_ref().and_then(|source| source.var(key))
    }
}

/// Client-safe environment snapshot.
///
/// The key set always equals [`CLIENT_KEYS`]; keys without a value are kept
/// with `None` so consumers can tell "unset" from "unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientEnv(BTreeMap<String, Option<String>>);

impl ClientEnv {
    /// Env built from the fallback table alone, used when no loader payload
    /// is available
    pub fn fallback() -> Self {
        create_client_env(&None::<EnvPayload>)
    }

    /// Raw value from the source, without fallback
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Option::as_deref)
    }

    /// Value from the source, or the hard-coded fallback
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw(key).or_else(|| fallback_value(key))
    }

    /// Resolved API base URL without a trailing slash
    pub fn api_base_url(&self) -> &str {
        self.get(API_BASE_URL)
            .unwrap_or_default()
            .trim_end_matches('/')
    }

    /// Region of the document bucket
    pub fn aws_region(&self) -> Option<&str> {
        self.get(AWS_REGION)
    }

    /// Name of the document bucket
    pub fn s3_bucket(&self) -> Option<&str> {
        self.get(S3_BUCKET)
    }

    /// Keys present in this env, in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Build the client env from `source`, restricted to [`CLIENT_KEYS`]
pub fn create_client_env(source: &impl EnvSource) -> ClientEnv {
    ClientEnv(
        CLIENT_KEYS
            .iter()
            .map(|key| ((*key).to_string(), source.var(key)))
            .collect(),
    )
}

/// Full server environment: the client keys plus credentials
#[derive(Clone)]
pub struct ServerEnv {
    public: ClientEnv,
    secrets: BTreeMap<&'static str, Secret>,
}

impl ServerEnv {
    /// The client-safe part of this env, suitable for a loader payload
    pub const fn client_env(&self) -> &ClientEnv {
        &self.public
    }

    /// Look up a public value (with fallback) or a secret
    pub fn get(&self, key: &str) -> Option<&str> {
        self.secrets
            .get(key)
            .map(Secret::expose)
            .or_else(|| self.public.get(key))
    }

    /// Look up a credential
    pub fn secret(&self, key: &str) -> Option<&Secret> {
        self.secrets.get(key)
    }

    /// Every key this env knows about, client keys first
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.public.keys().chain(self.secrets.keys().map(|key| &**key))
    }
}

impl std::fmt::Debug for ServerEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerEnv")
            .field("public", &self.public)
            .field("secrets", &self.secrets.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Build the server env. Public keys come from `source`, credentials only
/// from `secrets`.
pub fn create_server_env(source: &impl EnvSource, secrets: &impl SecretStore) -> ServerEnv {
    let secrets = SECRET_KEYS
        .iter()
        .filter_map(|key| secrets.secret(key).map(|secret| (*key, secret)))
        .collect::<BTreeMap<_, _>>();

    tracing::debug!(secret_count = secrets.len(), "Built server environment");

    ServerEnv {
        public: create_client_env(source),
        secrets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_api_base_url_without_payload() {
        assert_eq!(
            fallback_value("REMIX_PUBLIC_API_BASE_URL"),
            Some("https://api.admissions.example.edu/v1")
        );

        let env = ClientEnv::fallback();
        assert_eq!(env.raw(API_BASE_URL), None);
        assert_eq!(env.api_base_url(), "https://api.admissions.example.edu/v1");
    }

    #[test]
    fn test_no_fallback_for_credentials() {
        assert_eq!(fallback_value(AWS_ACCESS_KEY_ID), None);
        assert_eq!(fallback_value(AWS_SECRET_ACCESS_KEY), None);
        assert_eq!(fallback_value("UNKNOWN_KEY"), None);
    }

    #[test]
    fn test_client_env_key_set_matches_allow_list() {
        let empty = create_client_env(&EnvPayload::default());
        let partial = create_client_env(&EnvPayload::from_pairs([(
            API_BASE_URL,
            "https://api.test",
        )]));

        let mut expected: Vec<&str> = CLIENT_KEYS.to_vec();
        expected.sort_unstable();

        assert_eq!(empty.keys().collect::<Vec<_>>(), expected);
        assert_eq!(partial.keys().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_client_env_drops_secrets_from_source() {
        let payload = EnvPayload::from_pairs([
            (API_BASE_URL, "https://api.test"),
            (AWS_ACCESS_KEY_ID, "AKIA-LEAKED"),
            (AWS_SECRET_ACCESS_KEY, "very-secret"),
        ]);

        let env = create_client_env(&payload);
        assert!(env.keys().all(|key| !SECRET_KEYS.contains(&key)));

        let json = serde_json::to_string(&env).unwrap();
        assert!(!json.contains("very-secret"));
        assert!(!json.contains("AKIA-LEAKED"));
    }

    #[test]
    fn test_payload_value_wins_over_fallback() {
        let payload = EnvPayload::from_pairs([(API_BASE_URL, "https://api.test/")]);
        let env = create_client_env(&payload);

        assert_eq!(env.api_base_url(), "https://api.test");
        assert_eq!(env.aws_region(), Some("us-east-1"));
    }

    #[test]
    fn test_empty_payload_value_counts_as_unset() {
        let payload = EnvPayload::from_pairs([(API_BASE_URL, "")]);
        let env = create_client_env(&payload);

        assert_eq!(env.raw(API_BASE_URL), None);
        assert_eq!(env.api_base_url(), "https://api.admissions.example.edu/v1");
    }

    #[test]
    fn test_client_env_round_trips_loader_json() {
        let json = r#"{"REMIX_PUBLIC_API_BASE_URL":"https://api.test","REMIX_PUBLIC_AWS_REGION":null,"REMIX_PUBLIC_S3_BUCKET":null}"#;
        let env: ClientEnv = serde_json::from_str(json).unwrap();

        assert_eq!(env.api_base_url(), "https://api.test");
        assert_eq!(env.raw(AWS_REGION), None);
        assert_eq!(serde_json::to_string(&env).unwrap(), json);
    }

    #[test]
    fn test_server_env_takes_credentials_from_secret_store_only() {
        let source = EnvPayload::from_pairs([
            (API_BASE_URL, "https://api.test"),
            (AWS_SECRET_ACCESS_KEY, "from-source"),
        ]);
        let secrets = StaticSecrets::from_pairs([
            (AWS_ACCESS_KEY_ID, "AKIATEST"),
            (AWS_SECRET_ACCESS_KEY, "from-store"),
        ]);

        let env = create_server_env(&source, &secrets);

        assert_eq!(env.get(API_BASE_URL), Some("https://api.test"));
        assert_eq!(env.get(AWS_ACCESS_KEY_ID), Some("AKIATEST"));
        assert_eq!(env.get(AWS_SECRET_ACCESS_KEY), Some("from-store"));
        assert_eq!(env.keys().count(), CLIENT_KEYS.len() + SECRET_KEYS.len());
        assert!(env.client_env().raw(AWS_SECRET_ACCESS_KEY).is_none());
    }

    #[test]
    fn test_server_env_debug_redacts_secrets() {
        let secrets = StaticSecrets::from_pairs([(AWS_SECRET_ACCESS_KEY, "hunter2")]);
        let env = create_server_env(&EnvPayload::default(), &secrets);

        let debug = format!("{env:?}");
        assert!(debug.contains(AWS_SECRET_ACCESS_KEY));
        assert!(!debug.contains("hunter2"));
    }
}
