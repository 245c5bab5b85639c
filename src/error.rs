//! Error types for the astrofacts service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// Top-level error type for the fact service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP server setup error (bind, serve).
    #[error("server error: {0}")]
    Server(String),

    /// The client sent an unusable request. The message is returned verbatim.
    #[error("{0}")]
    BadRequest(String),

    /// The request body exceeded the server's size limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Unexpected failure while handling a request. The message is returned verbatim.
    #[error("{0}")]
    Internal(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fact policy or extraction error from the core crate.
    #[error(transparent)]
    Core(#[from] astrofacts_core::FactsError),
}

impl ServiceError {
    /// HTTP status reported to the client for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ServiceError>;
