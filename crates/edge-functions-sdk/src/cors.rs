//! Cross-origin header sets attached by browser-facing functions

/// A fixed set of CORS response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsHeaders {
    /// Value of `Access-Control-Allow-Origin`
    pub allow_origin: String,

    /// Value of `Access-Control-Allow-Headers`
    pub allow_headers: String,
}

impl CorsHeaders {
    /// Any origin, and the headers browser clients of the edge runtime send.
    pub fn permissive() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_headers: "authorization, x-client-info, apikey, content-type".to_string(),
        }
    }

    /// Header name/value pairs, ready to merge into a response.
    pub fn headers(&self) -> [(&'static str, String); 2] {
        [
            ("Access-Control-Allow-Origin", self.allow_origin.clone()),
            ("Access-Control-Allow-Headers", self.allow_headers.clone()),
        ]
    }
}
