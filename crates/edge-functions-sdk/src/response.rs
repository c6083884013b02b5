//! HTTP Response representation for handlers

use crate::cors::CorsHeaders;
use crate::error::HandlerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents an outgoing HTTP response.
///
/// # Quick Reference
///
/// | Method | Status | Use Case |
/// |--------|--------|----------|
/// | `ok(body)` | 200 | Successful response |
/// | `json(status, body)` | any | Compact JSON body |
/// | `try_json_pretty(status, body)` | any | Indented JSON body |
/// | `internal_error(msg)` | 500 | Server error |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Response body
    #[serde(default)]
    pub body: Option<String>,
}

impl Response {
    /// Create a new response with the given status code (no body).
    ///
    /// # Example
    /// ```ignore
    /// Response::new(200).with_cors(&CorsHeaders::permissive())
    /// ```
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Create a 200 OK response with JSON body.
    pub fn ok<T: Serialize>(body: T) -> Self {
        Self::json(200, body)
    }

    /// Create a compact JSON response with a custom status code.
    ///
    /// Serialization failures become a 500 response carrying the error message.
    ///
    /// # Example
    /// ```ignore
    /// Response::json(404, json!({"error": "Function not found"}))
    /// ```
    pub fn json<T: Serialize>(status: u16, body: T) -> Self {
        Self::try_json(status, body).unwrap_or_else(|e| e.to_response())
    }

    /// Create a compact JSON response, returning serialization errors to the caller.
    pub fn try_json<T: Serialize>(status: u16, body: T) -> Result<Self, HandlerError> {
        let body = serde_json::to_string(&body)?;
        Ok(Self::new(status)
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    /// Create a JSON response indented with two spaces.
    pub fn try_json_pretty<T: Serialize>(status: u16, body: T) -> Result<Self, HandlerError> {
        let body = serde_json::to_string_pretty(&body)?;
        Ok(Self::new(status)
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    /// Create a 500 Internal Server Error response.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::json(500, serde_json::json!({"error": message.into()}))
    }

    /// Add a header to the response (builder pattern).
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Merge a set of headers into the response; later values win.
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in headers {
            self.headers.insert(key.into(), value.into());
        }
        self
    }

    /// Set the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add CORS headers for cross-origin requests.
    ///
    /// # Example
    /// ```ignore
    /// Response::ok(data).with_cors(&CorsHeaders::permissive())
    /// ```
    pub fn with_cors(self, cors: &CorsHeaders) -> Self {
        self.with_headers(cors.headers())
    }

    /// Get a header value (case-insensitive lookup).
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(200)
    }
}
