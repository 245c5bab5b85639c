//! # astrofacts-core
//!
//! Fact extraction and fallback fact generation for astronomy images.
//!
//! This crate is pure: no network, no async, no global state. The service
//! crate feeds it prompts and upstream responses.
//!
//! ## Design
//!
//! - [`prompt`] reads the image title and requested fact count from a prompt
//! - [`interpreter`] turns unstructured generated text into a bounded fact list
//! - [`fallback`] classifies a title by keyword and renders fixed fact templates
//! - [`FactPolicy`] holds the count default and ceiling shared by all three

pub mod error;
pub mod fallback;
pub mod interpreter;
pub mod policy;
pub mod prompt;
pub mod types;

pub use error::{FactsError, Result};
pub use policy::FactPolicy;
pub use types::{Category, FactRequest, FactTemplate, TitleCase, UNKNOWN_TITLE};

/// Produce fallback facts for a prompt without consulting any upstream API.
///
/// Convenience wrapper combining [`FactRequest::from_prompt`] and
/// [`fallback::generate`].
///
/// # Examples
///
/// ```
/// use astrofacts_core::{fallback_facts_for_prompt, FactPolicy};
///
/// let facts = fallback_facts_for_prompt(
///     r#"Tell me about "Crab Nebula", exactly 2 facts"#,
///     &FactPolicy::default(),
/// );
/// assert_eq!(facts.len(), 2);
/// assert!(facts[0].contains("Crab Nebula"));
/// ```
pub fn fallback_facts_for_prompt(prompt: &str, policy: &FactPolicy) -> Vec<String> {
    let request = FactRequest::from_prompt(prompt, policy);
    fallback::generate(&request.title, request.count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_for_prompt_without_title_is_generic() {
        let facts = fallback_facts_for_prompt("anything, exactly 1", &FactPolicy::default());
        assert_eq!(
            facts,
            vec!["The unknown cosmic object represents one of the most fascinating phenomena in our universe."]
        );
    }

    #[test]
    fn fallback_for_prompt_uses_default_count() {
        let facts = fallback_facts_for_prompt(r#""M87 Galaxy""#, &FactPolicy::default());
        assert_eq!(facts.len(), 5);
    }
}
