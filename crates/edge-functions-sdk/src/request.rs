//! HTTP Request representation for handlers

use crate::error::HandlerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents an incoming HTTP request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method (GET, POST, OPTIONS, etc.)
    pub method: String,

    /// Absolute request URL (e.g., "http://localhost:8000/functions/v1/hello-world")
    pub url: String,

    /// Request path as seen by the host (e.g., "/functions/v1/hello-world")
    pub path: String,

    /// HTTP headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Request body as text
    #[serde(default)]
    pub body: Option<String>,

    /// Request ID for tracing
    #[serde(default)]
    pub request_id: String,
}

impl Request {
    /// Build a request for `method` and absolute `url`, deriving `path` from the URL.
    ///
    /// # Example
    /// ```ignore
    /// let req = Request::new("POST", "http://localhost/hello").with_body(r#"{"name":"Ada"}"#);
    /// ```
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let path = url::Url::parse(&url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| "/".to_string());

        Self {
            method: method.into(),
            url,
            path,
            ..Self::default()
        }
    }

    /// Set the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add a header (builder pattern).
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Parse the body as JSON into a typed struct.
    ///
    /// An absent body is parsed as JSON `null`.
    ///
    /// # Example
    /// ```ignore
    /// #[derive(Deserialize)]
    /// struct CreateUser { name: String, email: String }
    ///
    /// let user: CreateUser = req.json()?;
    /// ```
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, HandlerError> {
        let body = self.body.as_deref().unwrap_or("null");
        serde_json::from_str(body)
            .map_err(|e| HandlerError::BadRequest(format!("Invalid JSON: {}", e)))
    }

    /// Parse the body as JSON, substituting `T::default()` on any failure.
    ///
    /// Absent, empty and malformed bodies are all treated the same way.
    ///
    /// # Example
    /// ```ignore
    /// let input: Greeting = req.json_or_default();
    /// ```
    pub fn json_or_default<T: for<'de> Deserialize<'de> + Default>(&self) -> T {
        self.json().unwrap_or_default()
    }

    /// Path component of the request URL.
    ///
    /// Falls back to the host-supplied `path` when `url` is not a valid absolute URL.
    pub fn pathname(&self) -> String {
        match url::Url::parse(&self.url) {
            Ok(url) => url.path().to_string(),
            Err(_) => self.path.clone(),
        }
    }

    /// Get a header value (case-insensitive lookup).
    ///
    /// # Example
    /// ```ignore
    /// let auth = req.header("Authorization"); // Works with any case
    /// ```
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Check if request method matches (case-insensitive).
    pub fn is_method(&self, method: &str) -> bool {
        self.method.eq_ignore_ascii_case(method)
    }

    /// Check if this is a CORS pre-flight request.
    pub fn is_preflight(&self) -> bool {
        self.is_method("OPTIONS")
    }
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            url: "http://localhost/".to_string(),
            path: "/".to_string(),
            headers: HashMap::new(),
            body: None,
            request_id: String::new(),
        }
    }
}
