//! Configuration types for the fact service.

use astrofacts_core::FactPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ServiceError};

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "ASTROFACTS_CONFIG";

/// Top-level configuration for the fact service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Cross-origin response header settings.
    pub cors: CorsConfig,
    /// Generation API settings.
    pub openai: OpenAiConfig,
    /// Where the API key comes from.
    pub secrets: SecretsConfig,
    /// Fact count default, ceiling and parsing thresholds.
    pub facts: FactPolicy,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Port to listen on (`0` = auto-assign).
    pub port: u16,
    /// Path the facts endpoint is mounted on.
    pub route: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8787,
            route: "/facts".to_owned(),
        }
    }
}

/// Cross-origin configuration.
///
/// Origins in `allowed_origins` are echoed back exactly. When
/// `allow_localhost` is on, any `http://localhost:<port>` origin is echoed
/// too. Every other origin receives `*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins echoed in `Access-Control-Allow-Origin`.
    pub allowed_origins: Vec<String>,
    /// Echo `http://localhost:<port>` origins for local development.
    pub allow_localhost: bool,
    /// Value of `Access-Control-Allow-Headers`.
    pub allow_headers: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allow_localhost: true,
            allow_headers: "Content-Type".to_owned(),
        }
    }
}

/// Generation API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Base URL; `/v1/chat/completions` is appended.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Token ceiling for the completion.
    pub max_tokens: u32,
    /// Sampling temperature (0.0–2.0).
    pub temperature: f64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_owned(),
            model: "gpt-3.5-turbo".to_owned(),
            max_tokens: 300,
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

/// Backend holding the JSON secret payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretBackend {
    /// Platform credential store via `keyring`.
    #[default]
    Keyring,
    /// An environment variable.
    Env,
    /// A JSON file on disk.
    File,
}

/// Secret lookup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    /// Which backend to read from.
    pub backend: SecretBackend,
    /// Identifier of the secret (keyring account name).
    pub secret_id: String,
    /// Environment variable read by the `env` backend.
    pub env_var: String,
    /// File read by the `file` backend.
    pub file: Option<PathBuf>,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            backend: SecretBackend::default(),
            secret_id: "wallpaper-app/openai-api-key".to_owned(),
            env_var: "ASTROFACTS_OPENAI_SECRET".to_owned(),
            file: None,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Load from `path` if it exists, otherwise return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ServiceError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the config file path.
    ///
    /// `ASTROFACTS_CONFIG` wins; otherwise `dirs::config_dir()/astrofacts/config.toml`.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|d| d.join("astrofacts"))
            .unwrap_or_else(|| PathBuf::from("/tmp/astrofacts-config"))
            .join("config.toml")
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] for an unusable route, timeout,
    /// temperature or secret backend, and [`ServiceError::Core`] for an
    /// invalid fact policy.
    pub fn validate(&self) -> Result<()> {
        self.facts.validate()?;
        if !self.server.route.starts_with('/') {
            return Err(ServiceError::Config(
                "server.route must start with '/'".into(),
            ));
        }
        if self.openai.timeout_secs == 0 {
            return Err(ServiceError::Config(
                "openai.timeout_secs must be greater than 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.openai.temperature) {
            return Err(ServiceError::Config(
                "openai.temperature must be within 0.0..=2.0".into(),
            ));
        }
        if self.secrets.backend == SecretBackend::File && self.secrets.file.is_none() {
            return Err(ServiceError::Config(
                "secrets.file is required for the file backend".into(),
            ));
        }
        Ok(())
    }
}
