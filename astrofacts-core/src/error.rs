//! Error types for the astrofacts-core crate.
//!
//! Fact extraction itself never fails observably; these errors only surface
//! from the structural step of reading an upstream response and from policy
//! validation.

/// Errors produced by fact extraction helpers and policy validation.
#[derive(Debug, thiserror::Error)]
pub enum FactsError {
    /// The upstream completion response did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid fact policy.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for astrofacts-core results.
pub type Result<T> = std::result::Result<T, FactsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_malformed_response() {
        let err = FactsError::MalformedResponse("missing choices".into());
        assert_eq!(err.to_string(), "malformed response: missing choices");
    }

    #[test]
    fn display_config() {
        let err = FactsError::Config("max_facts must be > 0".into());
        assert_eq!(err.to_string(), "config error: max_facts must be > 0");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FactsError>();
    }
}
