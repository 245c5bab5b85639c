//! Fact policy with sensible defaults.
//!
//! [`FactPolicy`] holds the limits shared by the prompt reader, the response
//! interpreter and the fallback generator. The count default and ceiling have
//! changed before, so they are configuration rather than constants.

use serde::{Deserialize, Serialize};

use crate::error::FactsError;

/// Limits applied when reading prompts and extracting facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactPolicy {
    /// Number of facts requested when the prompt does not say `exactly N`.
    pub default_count: usize,
    /// Hard ceiling on the number of facts in any response.
    pub max_facts: usize,
    /// A line-extracted fact must be strictly longer than this many characters.
    pub min_line_len: usize,
    /// Number of characters kept when the whole response is used as one fact.
    pub excerpt_chars: usize,
}

impl Default for FactPolicy {
    fn default() -> Self {
        Self {
            default_count: 5,
            max_facts: 10,
            min_line_len: 10,
            excerpt_chars: 200,
        }
    }
}

impl FactPolicy {
    /// Validates this policy, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_facts` must be greater than 0
    /// - `default_count` must be <= `max_facts`
    /// - `excerpt_chars` must be greater than 0
    pub fn validate(&self) -> Result<(), FactsError> {
        if self.max_facts == 0 {
            return Err(FactsError::Config(
                "max_facts must be greater than 0".into(),
            ));
        }
        if self.default_count > self.max_facts {
            return Err(FactsError::Config(
                "default_count must be <= max_facts".into(),
            ));
        }
        if self.excerpt_chars == 0 {
            return Err(FactsError::Config(
                "excerpt_chars must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Clamp a requested count into `[0, max_facts]`.
    pub fn clamp_count(&self, requested: usize) -> usize {
        requested.min(self.max_facts)
    }
}
