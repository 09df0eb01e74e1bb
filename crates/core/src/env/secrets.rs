//! Secret-store abstraction for server-only credentials

use std::collections::BTreeMap;

/// A credential value that never appears in `Debug` output
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a raw credential
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the raw credential
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Where server credentials come from
pub trait SecretStore {
    /// Fetch a credential by key
    fn secret(&self, key: &str) -> Option<Secret>;
}

/// Credentials taken from the process environment of the loader
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvSecrets;

impl SecretStore for ProcessEnvSecrets {
    fn secret(&self, key: &str) -> Option<Secret> {
        std::env::var(key)
            .ok()
            .filter(|value| !value.is_empty())
            .map(Secret)
    }
}

/// Fixed in-memory credentials
#[derive(Debug, Clone, Default)]
pub struct StaticSecrets(BTreeMap<String, Secret>);

impl StaticSecrets {
    /// Build a store from key/value pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), Secret::new(value)))
                .collect(),
        )
    }
}

impl SecretStore for StaticSecrets {
    fn secret(&self, key: &str) -> Option<Secret> {
        self.0.get(key).cloned()
    }
}

impl<S: SecretStore + ?Sized> SecretStore for &S {
    fn secret(&self, key: &str) -> Option<Secret> {
        (**self).secret(key)
    }
}
