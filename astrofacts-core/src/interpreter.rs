//! Turning free-form generated text into a bounded list of facts.
//!
//! The model is asked for a JSON array but frequently answers with quoted
//! sentences, a numbered list or plain prose. [`interpret_content`] runs an
//! ordered chain of parsers and keeps the first one that accepts the content:
//!
//! 1. the whole content as a JSON array, taken as-is even when empty
//! 2. every double-quoted substring
//! 3. one fact per sufficiently long line, with bullets and numbering removed
//! 4. the first characters of the content as a single excerpt
//!
//! None of the parsers fail on malformed input; they return `None` instead.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::error::{FactsError, Result};
use crate::policy::FactPolicy;

/// The only fact returned when the upstream response has the wrong shape.
pub const PROCESSING_ERROR_FACT: &str = "Error processing response";

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).unwrap_or_else(|e| panic!("quote regex: {e}")));

/// A single parsing strategy. `None` means "try the next one".
type Strategy = fn(&str, &FactPolicy) -> Option<Vec<String>>;

/// Strategies in priority order.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("json_array", parse_json_array),
    ("quoted", parse_quoted),
    ("lines", parse_lines),
    ("excerpt", parse_excerpt),
];

/// Extract facts from raw generated text.
///
/// A JSON array answer is returned as parsed (truncated to the ceiling), so
/// `[]` yields no facts. Any other content yields at least one fact.
pub fn interpret_content(content: &str, policy: &FactPolicy) -> Vec<String> {
    for (name, strategy) in STRATEGIES {
        if let Some(facts) = strategy(content, policy) {
            debug!(strategy = *name, count = facts.len(), "interpreted response");
            return facts;
        }
    }
    // parse_excerpt never returns None.
    Vec::new()
}

/// Read `choices[0].message.content` out of a chat completion response.
///
/// # Errors
///
/// Returns [`FactsError::MalformedResponse`] if any step of the path is
/// missing or the content is not a string.
pub fn extract_content(response: &Value) -> Result<&str> {
    let choice = response
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .ok_or_else(|| FactsError::MalformedResponse("no choices in response".into()))?;
    choice
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| FactsError::MalformedResponse("choice has no message content".into()))
}

/// Extract facts from a full chat completion response.
///
/// A response with the wrong shape yields `[PROCESSING_ERROR_FACT]`.
pub fn interpret_response(response: &Value, policy: &FactPolicy) -> Vec<String> {
    match extract_content(response) {
        Ok(content) => interpret_content(content, policy),
        Err(e) => {
            warn!(error = %e, "failed to extract facts from response");
            vec![PROCESSING_ERROR_FACT.to_owned()]
        }
    }
}

fn parse_json_array(content: &str, policy: &FactPolicy) -> Option<Vec<String>> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(content) else {
        return None;
    };
    Some(
        items
            .into_iter()
            .take(policy.max_facts)
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
    )
}

fn parse_quoted(content: &str, policy: &FactPolicy) -> Option<Vec<String>> {
    let facts: Vec<String> = QUOTED_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .take(policy.max_facts)
        .map(|m| m.as_str().to_owned())
        .collect();
    (!facts.is_empty()).then_some(facts)
}

fn parse_lines(content: &str, policy: &FactPolicy) -> Option<Vec<String>> {
    let facts: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_list_marker)
        .filter(|line| line.chars().count() > policy.min_line_len)
        .take(policy.max_facts)
        .map(str::to_owned)
        .collect();
    (!facts.is_empty()).then_some(facts)
}

fn parse_excerpt(content: &str, policy: &FactPolicy) -> Option<Vec<String>> {
    let mut excerpt: String = content.chars().take(policy.excerpt_chars).collect();
    excerpt.push_str("...");
    Some(vec![excerpt])
}

/// Strip a leading run of digits, dots, dashes, asterisks and whitespace.
fn strip_list_marker(line: &str) -> &str {
    line.trim_start_matches(|c: char| {
        c.is_ascii_digit() || c.is_whitespace() || matches!(c, '.' | '-' | '*')
    })
    .trim()
}
