//! HTTP front-end for the fact service.
//!
//! ## Endpoints
//!
//! All on the configured route (default `/facts`):
//!
//! - `OPTIONS`: CORS preflight, empty body
//! - `POST`: `{"prompt": "..."}` → `{"facts": [...]}`
//!
//! Every response, including errors, `405` and rejected bodies, carries CORS
//! headers for the request's `Origin`. They are added by a router-level
//! middleware rather than by each handler.

use axum::Router;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, header::ORIGIN};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::config::{CorsConfig, ServerConfig};
use crate::error::{Result, ServiceError};
use crate::facts::FactService;

/// Error message for a missing or empty prompt.
pub const MISSING_PROMPT: &str = "Missing prompt";

/// Error message for a prompt that is not a string.
pub const INVALID_PROMPT: &str = "Invalid prompt";

/// Successful response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactsResponse {
    /// Facts about the image, in order.
    pub facts: Vec<String>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Shared state for axum handlers.
#[derive(Clone)]
struct AppState {
    service: FactService,
}

/// Build the router serving the facts endpoint on `route`.
pub fn router(service: FactService, cors: CorsConfig, route: &str) -> Router {
    Router::new()
        .route(
            route,
            post(handle_facts)
                .options(handle_preflight)
                .fallback(handle_method_not_allowed),
        )
        .with_state(AppState { service })
        .layer(middleware::from_fn_with_state(Arc::new(cors), apply_cors))
}

/// The fact service bound to a TCP port.
pub struct FactsServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl FactsServer {
    /// Start serving in a background tokio task.
    ///
    /// Binds to `{config.host}:{config.port}` (use port `0` for auto-assign).
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(
        service: FactService,
        cors: CorsConfig,
        config: &ServerConfig,
    ) -> Result<Self> {
        let app = router(service, cors, &config.route);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ServiceError::Server(format!("bind to {bind_addr} failed: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ServiceError::Server(format!("failed to get local addr: {e}")))?;

        info!("facts server listening on http://{addr}{}", config.route);

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("facts server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Wait for the server task to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the task panicked or was aborted.
    pub async fn wait(&mut self) -> Result<()> {
        (&mut self.handle)
            .await
            .map_err(|e| ServiceError::Server(format!("server task ended: {e}")))
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for FactsServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn origin(headers: &HeaderMap) -> Option<&str> {
    headers.get(ORIGIN).and_then(|v| v.to_str().ok())
}

/// Add CORS headers to every response, including extractor rejections.
async fn apply_cors(State(cors): State<Arc<CorsConfig>>, request: Request, next: Next) -> Response {
    let headers = cors.headers(origin(request.headers()));
    let mut response = next.run(request).await;
    response.headers_mut().extend(headers);
    response
}

/// `OPTIONS` preflight. Headers come from [`apply_cors`].
async fn handle_preflight() -> StatusCode {
    StatusCode::OK
}

/// Any method other than `POST` and `OPTIONS`.
async fn handle_method_not_allowed() -> Response {
    let body = ErrorResponse {
        error: "Method not allowed".to_owned(),
    };
    (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response()
}

/// `POST`: facts for a prompt.
async fn handle_facts(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("facts_request", %request_id);

    let result = async {
        let body = body.map_err(body_error)?;
        let prompt = read_prompt(&body)?;
        Ok::<_, ServiceError>(state.service.facts_for_prompt(&prompt).await)
    }
    .instrument(span.clone())
    .await;

    match result {
        Ok(facts) => (StatusCode::OK, Json(FactsResponse { facts })).into_response(),
        Err(e) => {
            span.in_scope(|| warn!(status = e.status().as_u16(), error = %e, "request failed"));
            e.into_response()
        }
    }
}

/// Map a body that could not be buffered to a JSON error.
fn body_error(rejection: BytesRejection) -> ServiceError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServiceError::PayloadTooLarge(rejection.body_text())
    } else {
        ServiceError::Internal(rejection.body_text())
    }
}

/// Pull the prompt out of a request body.
///
/// Malformed JSON and non-object bodies are internal errors (500); a missing,
/// empty or non-string prompt is a client error (400).
fn read_prompt(body: &[u8]) -> Result<String> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ServiceError::Internal(format!("invalid JSON body: {e}")))?;
    let Value::Object(mut fields) = value else {
        return Err(ServiceError::Internal(
            "request body must be a JSON object".into(),
        ));
    };
    match fields.remove("prompt") {
        None | Some(Value::Null) => Err(ServiceError::BadRequest(MISSING_PROMPT.into())),
        Some(Value::String(prompt)) if prompt.is_empty() => {
            Err(ServiceError::BadRequest(MISSING_PROMPT.into()))
        }
        Some(Value::String(prompt)) => Ok(prompt),
        Some(_) => Err(ServiceError::BadRequest(INVALID_PROMPT.into())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn read_prompt_accepts_string() {
        assert_eq!(read_prompt(br#"{"prompt": "hello"}"#).unwrap(), "hello");
    }

    #[test]
    fn read_prompt_missing_is_bad_request() {
        let err = read_prompt(b"{}").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), MISSING_PROMPT);
    }

    #[test]
    fn read_prompt_empty_or_null_is_bad_request() {
        for body in [&br#"{"prompt": ""}"#[..], &br#"{"prompt": null}"#[..]] {
            let err = read_prompt(body).unwrap_err();
            assert_eq!(err.to_string(), MISSING_PROMPT);
        }
    }

    #[test]
    fn read_prompt_non_string_is_invalid() {
        let err = read_prompt(br#"{"prompt": 42}"#).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), INVALID_PROMPT);
    }

    #[test]
    fn read_prompt_bad_json_is_internal() {
        let err = read_prompt(b"{not json").unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("invalid JSON body"));
    }

    #[test]
    fn read_prompt_array_body_is_internal() {
        let err = read_prompt(br#"["prompt"]"#).unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn facts_response_shape() {
        let json = serde_json::to_value(FactsResponse {
            facts: vec!["a".into()],
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"facts": ["a"]}));
    }
}
