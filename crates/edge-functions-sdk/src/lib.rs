//! Edge Functions SDK - Types and utilities for writing edge function handlers
//!
//! A function is a plain `fn(Request) -> Response`. The host (the
//! `edge-runtime` binary, or the stdio loop in [`ipc`]) supplies one request
//! per invocation and forwards whatever response the function returns.

pub mod request;
pub mod response;
pub mod cors;
pub mod handler;
pub mod ipc;
pub mod error;

pub mod prelude {
    //! Common imports for edge function handlers
    pub use crate::request::Request;
    pub use crate::response::Response;
    pub use crate::cors::CorsHeaders;
    pub use crate::handler::{Function, HandlerFn};
    pub use crate::error::HandlerError;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{json, Value as JsonValue};
}

// Re-export key types at crate root
pub use request::Request;
pub use response::Response;
pub use cors::CorsHeaders;
pub use handler::{Function, HandlerFn};
pub use error::HandlerError;

#[doc(hidden)]
pub use tracing;
