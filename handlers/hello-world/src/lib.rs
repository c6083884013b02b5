//! Hello World function
//!
//! Greets the `name` from the JSON body, answering browsers with permissive
//! CORS headers. Reachable through the runtime at `/functions/v1/hello-world`.

use chrono::{SecondsFormat, Utc};
use edge_functions_sdk::prelude::*;

pub const FUNCTION: Function = Function::new("hello-world", "Hello World function started", handle);

const DEFAULT_NAME: &str = "World";

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: String,
    pub timestamp: String,
    pub method: String,
    pub url: String,
}

/// Handle incoming requests
pub fn handle(req: Request) -> Response {
    let cors = CorsHeaders::permissive();

    if req.is_preflight() {
        return Response::new(200).with_cors(&cors);
    }

    match greet(&req) {
        Ok(response) => response.with_cors(&cors),
        Err(e) => error_response(&e).with_cors(&cors),
    }
}

fn greet(req: &Request) -> Result<Response, HandlerError> {
    let greeting = Greeting {
        message: format!("Hello {}!", greeting_name(req)),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        method: req.method.clone(),
        url: req.url.clone(),
    };

    Response::try_json_pretty(200, &greeting)
}

/// Name to greet. Bodies that are not a JSON object count as empty; a `name`
/// that is present but not a string is rendered as its JSON text.
fn greeting_name(req: &Request) -> String {
    let body: serde_json::Map<String, JsonValue> = req.json_or_default();
    match body.get("name") {
        None => DEFAULT_NAME.to_string(),
        Some(JsonValue::String(name)) => name.clone(),
        Some(other) => other.to_string(),
    }
}

fn error_response(err: &HandlerError) -> Response {
    tracing::error!(error = %err, "hello-world failed");
    Response::internal_error(err.to_string())
}
