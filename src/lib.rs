//! astrofacts: trivia facts for astronomy images.
//!
//! A single HTTP endpoint takes a prompt describing an astronomy image and
//! answers with a short list of facts about it:
//! Prompt → API key lookup → generation API → Response interpreter
//!
//! When no key is configured or the generation call fails, the facts come
//! from a deterministic keyword-classified fallback instead. Either way the
//! client receives a list.
//!
//! # Architecture
//!
//! - **Core** (`astrofacts-core`): prompt reading, response interpretation
//!   and fallback facts. Pure functions, no I/O
//! - **Secrets**: API key lookup from keyring, environment or file
//! - **OpenAI client**: one `reqwest` call per request, no retries
//! - **Fact service**: per-request orchestration and fallback
//! - **Server**: `axum` router with CORS headers on every response

pub mod config;
pub mod cors;
pub mod error;
pub mod facts;
pub mod openai;
pub mod secrets;
pub mod server;

pub use config::ServiceConfig;
pub use error::{Result, ServiceError};
pub use facts::{FactOutcome, FactService, FactSource};
pub use server::FactsServer;
