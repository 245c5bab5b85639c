//! Reading the title and requested fact count out of a free-text prompt.

use regex::Regex;
use std::sync::LazyLock;

use crate::policy::FactPolicy;
use crate::types::{FactRequest, UNKNOWN_TITLE};

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).unwrap_or_else(|e| panic!("title regex: {e}")));

static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bexactly\s+([0-9]+)").unwrap_or_else(|e| panic!("count regex: {e}"))
});

/// Return the first double-quoted substring of `prompt`, or
/// [`UNKNOWN_TITLE`] when the prompt quotes nothing.
///
/// An empty pair of quotes yields an empty title.
pub fn extract_title(prompt: &str) -> String {
    TITLE_RE
        .captures(prompt)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_owned())
}

/// Return the `N` of the first `exactly N` in `prompt`, clamped to the
/// policy ceiling, or the policy default when there is none.
pub fn extract_requested_count(prompt: &str, policy: &FactPolicy) -> usize {
    let Some(digits) = COUNT_RE.captures(prompt).and_then(|caps| caps.get(1)) else {
        return policy.clamp_count(policy.default_count);
    };
    // Digit runs too long for usize saturate.
    let requested = digits.as_str().parse::<usize>().unwrap_or(usize::MAX);
    policy.clamp_count(requested)
}

impl FactRequest {
    /// Read title and count from `prompt`.
    pub fn from_prompt(prompt: &str, policy: &FactPolicy) -> Self {
        Self {
            title: extract_title(prompt),
            count: extract_requested_count(prompt, policy),
        }
    }
}
