//! Cross-origin response headers.
//!
//! The browser front-end calls the service from another origin, so every
//! response (including errors and the `OPTIONS` preflight) carries CORS
//! headers computed from the request's `Origin`.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, VARY,
};
use axum::http::{HeaderMap, HeaderValue};

use crate::config::CorsConfig;

/// Value of `Access-Control-Allow-Methods`.
pub const ALLOW_METHODS: &str = "POST, OPTIONS";

/// Value of `Access-Control-Max-Age` (one day).
pub const MAX_AGE_SECS: &str = "86400";

const LOCALHOST_PREFIX: &str = "http://localhost:";

impl CorsConfig {
    /// Whether `origin` is echoed back rather than answered with `*`.
    pub fn is_allowed(&self, origin: &str) -> bool {
        if self.allowed_origins.iter().any(|allowed| allowed == origin) {
            return true;
        }
        self.allow_localhost && is_localhost_origin(origin)
    }

    /// Value of `Access-Control-Allow-Origin` for a request from `origin`.
    pub fn allow_origin(&self, origin: Option<&str>) -> String {
        match origin {
            Some(origin) if self.is_allowed(origin) => origin.to_owned(),
            _ => "*".to_owned(),
        }
    }

    /// Full set of CORS headers for a request from `origin`.
    pub fn headers(&self, origin: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let allow_origin = self.allow_origin(origin);
        let echoed = allow_origin != "*";

        // Origins come from a parsed request header and config strings come
        // from TOML; both can still hold bytes a header value rejects.
        let allow_origin =
            HeaderValue::from_str(&allow_origin).unwrap_or(HeaderValue::from_static("*"));
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
        if echoed {
            headers.insert(VARY, HeaderValue::from_static("Origin"));
        }
        let allow_headers = HeaderValue::from_str(&self.allow_headers)
            .unwrap_or(HeaderValue::from_static("Content-Type"));
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
        headers
    }
}

/// `http://localhost:<port>` with a non-empty, all-digit port.
fn is_localhost_origin(origin: &str) -> bool {
    origin
        .strip_prefix(LOCALHOST_PREFIX)
        .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}
