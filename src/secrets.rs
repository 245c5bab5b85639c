//! API key lookup.
//!
//! The key is stored as a JSON secret payload such as
//! `{"OPENAI_API_KEY": "sk-..."}` under a fixed secret identifier. Backends:
//!
//! - **Keyring**: platform credential store via the `keyring` crate
//!   (macOS Keychain, Secret Service, Windows Credential Manager)
//! - **Env**: an environment variable holding the payload
//! - **File**: a JSON file holding the payload
//! - **Static**: an in-memory map, for tests and embedding
//!
//! Failure to obtain a key is never an error for the caller:
//! [`resolve_api_key`] logs it and returns `None`, and the service falls back.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{SecretBackend, SecretsConfig};

/// Service name for astrofacts secrets in the platform credential store.
pub const KEYRING_SERVICE: &str = "astrofacts";

/// Field of the secret payload holding the API key.
pub const API_KEY_FIELD: &str = "OPENAI_API_KEY";

/// Value shipped in deployment templates; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "your-openai-api-key-here";

/// Errors from a secret backend.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// No secret stored under the identifier.
    #[error("secret not found: {0}")]
    NotFound(String),

    /// The backend failed (access denied, I/O, platform error).
    #[error("secret backend error: {0}")]
    Backend(String),
}

/// Source of raw secret payloads.
pub trait SecretStore: Send + Sync {
    /// Return the raw payload stored under `secret_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::NotFound`] when nothing is stored under the
    /// identifier, [`SecretError::Backend`] for any other failure.
    fn secret_string(&self, secret_id: &str) -> Result<String, SecretError>;
}

/// Platform credential store backend.
#[derive(Debug, Default)]
pub struct KeyringSecretStore;

impl SecretStore for KeyringSecretStore {
    fn secret_string(&self, secret_id: &str) -> Result<String, SecretError> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, secret_id).map_err(|e| {
            SecretError::Backend(format!("failed to create keyring entry: {e}"))
        })?;
        match entry.get_password() {
            Ok(payload) => Ok(payload),
            Err(keyring::Error::NoEntry) => Err(SecretError::NotFound(secret_id.to_owned())),
            Err(e) => Err(SecretError::Backend(format!(
                "failed to retrieve secret: {e}"
            ))),
        }
    }
}

/// Environment variable backend. The secret id is ignored.
#[derive(Debug)]
pub struct EnvSecretStore {
    var: String,
}

impl EnvSecretStore {
    /// Read the payload from the environment variable `var`.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl SecretStore for EnvSecretStore {
    fn secret_string(&self, _secret_id: &str) -> Result<String, SecretError> {
        match std::env::var(&self.var) {
            Ok(payload) => Ok(payload),
            Err(std::env::VarError::NotPresent) => Err(SecretError::NotFound(self.var.clone())),
            Err(e) => Err(SecretError::Backend(format!("{}: {e}", self.var))),
        }
    }
}

/// JSON file backend. The secret id is ignored.
#[derive(Debug)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    /// Read the payload from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SecretStore for FileSecretStore {
    fn secret_string(&self, _secret_id: &str) -> Result<String, SecretError> {
        std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SecretError::NotFound(self.path.display().to_string()),
            _ => SecretError::Backend(format!("{}: {e}", self.path.display())),
        })
    }
}

/// In-memory backend keyed by secret id.
#[derive(Debug, Default, Clone)]
pub struct StaticSecretStore {
    secrets: HashMap<String, String>,
}

impl StaticSecretStore {
    /// An empty store: every lookup is `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a payload under `secret_id`.
    #[must_use]
    pub fn with_secret(mut self, secret_id: impl Into<String>, payload: impl Into<String>) -> Self {
        self.secrets.insert(secret_id.into(), payload.into());
        self
    }

    /// Store `{"OPENAI_API_KEY": api_key}` under `secret_id`.
    #[must_use]
    pub fn with_api_key(self, secret_id: impl Into<String>, api_key: &str) -> Self {
        let payload = serde_json::json!({ API_KEY_FIELD: api_key }).to_string();
        self.with_secret(secret_id, payload)
    }
}

impl SecretStore for StaticSecretStore {
    fn secret_string(&self, secret_id: &str) -> Result<String, SecretError> {
        self.secrets
            .get(secret_id)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(secret_id.to_owned()))
    }
}

/// Build the store selected by `config`.
pub fn store_from_config(config: &SecretsConfig) -> Arc<dyn SecretStore> {
    match config.backend {
        SecretBackend::Keyring => Arc::new(KeyringSecretStore),
        SecretBackend::Env => Arc::new(EnvSecretStore::new(config.env_var.clone())),
        SecretBackend::File => Arc::new(FileSecretStore::new(
            config.file.clone().unwrap_or_default(),
        )),
    }
}

/// Look up the API key under `secret_id`.
///
/// Returns `None` (after logging why) when the store fails, the payload is
/// not a JSON object, the key field is missing or not a string, or the key
/// is blank or the deployment placeholder.
pub fn resolve_api_key(store: &dyn SecretStore, secret_id: &str) -> Option<String> {
    let payload = match store.secret_string(secret_id) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "failed to retrieve API key");
            return None;
        }
    };
    let parsed: serde_json::Value = match serde_json::from_str(&payload) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "secret payload is not valid JSON");
            return None;
        }
    };
    let Some(key) = parsed.get(API_KEY_FIELD).and_then(serde_json::Value::as_str) else {
        warn!(field = API_KEY_FIELD, "secret payload has no API key string");
        return None;
    };
    let key = key.trim();
    if key.is_empty() || key == PLACEHOLDER_API_KEY {
        debug!("API key not configured");
        return None;
    }
    Some(key.to_owned())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    const ID: &str = "wallpaper-app/openai-api-key";

    #[test]
    fn resolves_key_from_payload() {
        let store = StaticSecretStore::new().with_api_key(ID, "sk-test");
        assert_eq!(resolve_api_key(&store, ID).as_deref(), Some("sk-test"));
    }

    #[test]
    fn missing_secret_is_none() {
        let store = StaticSecretStore::new();
        assert!(resolve_api_key(&store, ID).is_none());
    }

    #[test]
    fn wrong_id_is_none() {
        let store = StaticSecretStore::new().with_api_key("other", "sk-test");
        assert!(resolve_api_key(&store, ID).is_none());
    }

    #[test]
    fn invalid_json_is_none() {
        let store = StaticSecretStore::new().with_secret(ID, "sk-not-json");
        assert!(resolve_api_key(&store, ID).is_none());
    }

    #[test]
    fn missing_field_is_none() {
        let store = StaticSecretStore::new().with_secret(ID, r#"{"OTHER_KEY": "x"}"#);
        assert!(resolve_api_key(&store, ID).is_none());
    }

    #[test]
    fn non_string_field_is_none() {
        let store = StaticSecretStore::new().with_secret(ID, r#"{"OPENAI_API_KEY": 42}"#);
        assert!(resolve_api_key(&store, ID).is_none());
    }

    #[test]
    fn placeholder_is_none() {
        let store = StaticSecretStore::new().with_api_key(ID, PLACEHOLDER_API_KEY);
        assert!(resolve_api_key(&store, ID).is_none());
    }

    #[test]
    fn blank_key_is_none() {
        let store = StaticSecretStore::new().with_api_key(ID, "   ");
        assert!(resolve_api_key(&store, ID).is_none());
    }

    #[test]
    fn file_store_reads_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.json");
        std::fs::write(&path, r#"{"OPENAI_API_KEY": "sk-file"}"#).unwrap();
        let store = FileSecretStore::new(&path);
        assert_eq!(resolve_api_key(&store, ID).as_deref(), Some("sk-file"));
    }

    #[test]
    fn file_store_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSecretStore::new(dir.path().join("absent.json"));
        assert!(matches!(
            store.secret_string(ID),
            Err(SecretError::NotFound(_))
        ));
    }

    #[test]
    fn env_store_missing_var_is_not_found() {
        let store = EnvSecretStore::new("ASTROFACTS_TEST_SECRET_THAT_IS_NEVER_SET");
        assert!(matches!(
            store.secret_string(ID),
            Err(SecretError::NotFound(_))
        ));
    }

    #[test]
    fn store_from_config_selects_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.json");
        std::fs::write(&path, r#"{"OPENAI_API_KEY": "sk-configured"}"#).unwrap();
        let config = SecretsConfig {
            backend: SecretBackend::File,
            file: Some(path),
            ..Default::default()
        };
        let store = store_from_config(&config);
        assert_eq!(
            resolve_api_key(store.as_ref(), &config.secret_id).as_deref(),
            Some("sk-configured")
        );
    }
}
