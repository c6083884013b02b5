//! Main function
//!
//! Entry point the runtime falls back to for every request that does not name
//! a deployed function. Answers health probes and reports everything else as
//! a missing function. No CORS headers: this is a same-origin probe.

use chrono::{SecondsFormat, Utc};
use edge_functions_sdk::prelude::*;

pub const FUNCTION: Function = Function::new("main", "Edge Functions main worker started", handle);

pub const VERSION: &str = "1.0.0";

const HEALTH_PATHS: [&str; 3] = ["/health", "/", ""];

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FunctionNotFound {
    pub error: &'static str,
    pub path: String,
    pub message: &'static str,
}

/// Handle incoming requests
pub fn handle(req: Request) -> Response {
    let pathname = req.pathname();

    tracing::info!("Request: {} {}", req.method, pathname);

    if HEALTH_PATHS.contains(&pathname.as_str()) {
        return Response::json(200, HealthStatus {
            status: "ok",
            message: "Supabase Edge Functions runtime is running",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: VERSION,
        });
    }

    Response::json(404, FunctionNotFound {
        error: "Function not found",
        path: pathname,
        message: "Create your functions in handlers/<function-name>/src/lib.rs",
    })
}
