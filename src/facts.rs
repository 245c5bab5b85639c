//! Per-request fact orchestration.
//!
//! [`FactService`] ties the pieces together: read the title and count from
//! the prompt, look up the API key, try the generation API once, and use the
//! deterministic fallback whenever that path does not produce a response.

use std::sync::Arc;

use astrofacts_core::fallback;
use astrofacts_core::interpreter::interpret_response;
use astrofacts_core::{FactPolicy, FactRequest};
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::openai::OpenAiClient;
use crate::secrets::{self, SecretStore};

/// Where a fact list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactSource {
    /// Interpreted from a generation API response.
    Upstream,
    /// Rendered from the local templates.
    Fallback,
}

/// Facts for one request, with their origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactOutcome {
    /// The facts, in order.
    pub facts: Vec<String>,
    /// Which path produced them.
    pub source: FactSource,
}

/// Produces facts for prompts. Cheap to clone; shared by all requests.
#[derive(Clone)]
pub struct FactService {
    policy: FactPolicy,
    secret_id: String,
    secrets: Arc<dyn SecretStore>,
    client: OpenAiClient,
}

impl FactService {
    /// Assemble a service from its parts.
    pub fn new(
        policy: FactPolicy,
        secret_id: impl Into<String>,
        secrets: Arc<dyn SecretStore>,
        client: OpenAiClient,
    ) -> Self {
        Self {
            policy,
            secret_id: secret_id.into(),
            secrets,
            client,
        }
    }

    /// Build a service from configuration, with the configured secret backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let secrets = secrets::store_from_config(&config.secrets);
        Self::with_secret_store(config, secrets)
    }

    /// Build a service from configuration with an explicit secret store.
    ///
    /// # Errors
    ///
    /// Same as [`FactService::from_config`].
    pub fn with_secret_store(config: &ServiceConfig, secrets: Arc<dyn SecretStore>) -> Result<Self> {
        config.validate()?;
        let client = OpenAiClient::new(config.openai.clone())?;
        Ok(Self::new(
            config.facts.clone(),
            config.secrets.secret_id.clone(),
            secrets,
            client,
        ))
    }

    /// Facts for `prompt`. Never fails: upstream problems fall back.
    pub async fn facts_for_prompt(&self, prompt: &str) -> Vec<String> {
        self.outcome_for_prompt(prompt).await.facts
    }

    /// Like [`FactService::facts_for_prompt`], also reporting the source.
    pub async fn outcome_for_prompt(&self, prompt: &str) -> FactOutcome {
        let request = FactRequest::from_prompt(prompt, &self.policy);
        debug!(prompt, title = %request.title, count = request.count, "fact request");

        if let Some(api_key) = self.api_key().await {
            if let Some(response) = self.client.complete(prompt, &api_key).await {
                let facts = interpret_response(&response, &self.policy);
                info!(count = facts.len(), "facts from generation API");
                return FactOutcome {
                    facts,
                    source: FactSource::Upstream,
                };
            }
        }

        info!(title = %request.title, count = request.count, "using fallback facts");
        FactOutcome {
            facts: fallback::generate(&request.title, request.count),
            source: FactSource::Fallback,
        }
    }

    /// Look up the API key off the async runtime; backends may block.
    async fn api_key(&self) -> Option<String> {
        let store = Arc::clone(&self.secrets);
        let secret_id = self.secret_id.clone();
        match tokio::task::spawn_blocking(move || secrets::resolve_api_key(store.as_ref(), &secret_id))
            .await
        {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "API key lookup task failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::config::OpenAiConfig;
    use crate::secrets::StaticSecretStore;

    fn service(store: StaticSecretStore) -> FactService {
        let config = ServiceConfig {
            openai: OpenAiConfig {
                // Nothing listens here; any call fails fast.
                base_url: "http://127.0.0.1:1".to_owned(),
                timeout_secs: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        FactService::with_secret_store(&config, Arc::new(store)).unwrap()
    }

    #[tokio::test]
    async fn no_key_uses_fallback() {
        let outcome = service(StaticSecretStore::new())
            .outcome_for_prompt("Tell me about \"Crab Nebula\" — generate exactly 3 facts")
            .await;
        assert_eq!(outcome.source, FactSource::Fallback);
        assert_eq!(outcome.facts, fallback::generate("Crab Nebula", 3));
    }

    #[tokio::test]
    async fn placeholder_key_uses_fallback() {
        let store = StaticSecretStore::new()
            .with_api_key("wallpaper-app/openai-api-key", secrets::PLACEHOLDER_API_KEY);
        let outcome = service(store).outcome_for_prompt("\"Orion\" exactly 2").await;
        assert_eq!(outcome.source, FactSource::Fallback);
        assert_eq!(outcome.facts.len(), 2);
    }

    #[tokio::test]
    async fn unreachable_upstream_uses_fallback() {
        let store = StaticSecretStore::new().with_api_key("wallpaper-app/openai-api-key", "sk-test");
        let outcome = service(store).outcome_for_prompt("\"Jupiter\"").await;
        assert_eq!(outcome.source, FactSource::Fallback);
        assert_eq!(outcome.facts, fallback::generate("Jupiter", 5));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = ServiceConfig::default();
        config.facts.max_facts = 0;
        config.facts.default_count = 0;
        let result = FactService::with_secret_store(&config, Arc::new(StaticSecretStore::new()));
        assert!(result.is_err());
    }
}
