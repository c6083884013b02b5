//! Error types for edge function handlers

use thiserror::Error;

/// Errors that can occur in a handler
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("IPC error: {0}")]
    IpcError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Convert the error to an HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::BadRequest(_) => 400,
            _ => 500,
        }
    }

    /// Convert to a JSON Response with an `{"error": <message>}` body
    pub fn to_response(&self) -> crate::Response {
        let body = serde_json::json!({ "error": self.to_string() }).to_string();
        crate::Response::new(self.status_code())
            .with_header("Content-Type", "application/json")
            .with_body(body)
    }
}

impl From<HandlerError> for crate::Response {
    fn from(err: HandlerError) -> Self {
        err.to_response()
    }
}
