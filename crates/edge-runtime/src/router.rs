//! Runtime router - hands HTTP requests to edge functions
//!
//! `/functions/v1/{name}` reaches the named function when it is deployed.
//! Everything else, unknown names included, goes to the `main` function.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use edge_functions_sdk::Function;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;

/// Create the runtime router that handles all incoming requests
pub fn create_runtime_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/functions/v1/{name}", any(handle_named_function))
        .route("/functions/v1/{name}/{*rest}", any(handle_named_function))
        .fallback(handle_main_function)
}

async fn handle_named_function(
    State(state): State<Arc<AppState>>,
    Path(params): Path<HashMap<String, String>>,
    request: Request<Body>,
) -> Response {
    let function = params
        .get("name")
        .and_then(|name| state.functions.get(name))
        .unwrap_or_else(|| state.functions.fallback());

    invoke(&state, function, request).await
}

async fn handle_main_function(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
) -> Response {
    let function = state.functions.fallback();
    invoke(&state, function, request).await
}

/// Buffer the request, run the function, and translate its response
async fn invoke(state: &AppState, function: Function, request: Request<Body>) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        function = function.name,
        method = %method,
        path = %path,
        "Incoming request"
    );

    let url = absolute_url(&request);

    let headers: HashMap<String, String> = request.headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();

    let body_bytes = match axum::body::to_bytes(request.into_body(), state.config.max_body_bytes).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(request_id = %request_id, "Failed to read body: {}", e);
            return (StatusCode::BAD_REQUEST, "Failed to read body").into_response();
        }
    };

    let body = if body_bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&body_bytes).to_string())
    };

    let sdk_request = edge_functions_sdk::Request {
        method,
        url,
        path,
        headers,
        body,
        request_id: request_id.clone(),
    };

    let result = state.functions.execute_with_timeout(
        function,
        sdk_request,
        state.config.handler_timeout(),
    ).await;

    match result {
        Ok(sdk_response) => into_http_response(sdk_response),
        Err(e) => {
            tracing::error!(request_id = %request_id, "Function error: {}", e);
            into_http_response(edge_functions_sdk::Response::internal_error(e.to_string()))
        }
    }
}

/// Rebuild the absolute URL the client used
fn absolute_url(request: &Request<Body>) -> String {
    let scheme = header_str(request, "x-forwarded-proto").unwrap_or("http");
    let host = header_str(request, "host").unwrap_or("localhost");
    let path_and_query = request.uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    format!("{}://{}{}", scheme, host, path_and_query)
}

fn header_str<'a>(request: &'a Request<Body>, name: &str) -> Option<&'a str> {
    request.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
}

fn into_http_response(sdk_response: edge_functions_sdk::Response) -> Response {
    let status = match StatusCode::from_u16(sdk_response.status) {
        Ok(status) => status,
        Err(_) => {
            tracing::warn!(status = sdk_response.status, "Function returned an invalid status code");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Invalid status code from function").into_response();
        }
    };

    let mut builder = Response::builder().status(status);

    for (key, value) in &sdk_response.headers {
        builder = builder.header(key, value);
    }

    match builder.body(Body::from(sdk_response.body.unwrap_or_default())) {
        Ok(response) => response,
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build response").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::registry::FunctionRegistry;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let mut functions = FunctionRegistry::new(handler_main::FUNCTION);
        functions.register(handler_hello_world::FUNCTION);

        let state = Arc::new(AppState {
            config: AppConfig::default(),
            functions,
        });

        create_runtime_router().with_state(state)
    }

    async fn send(method: &str, uri: &str, body: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("host", "localhost:8000")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_through_main() {
        let (status, headers, body) = send("GET", "/health", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["content-type"], "application/json");

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], "1.0.0");
    }

    #[tokio::test]
    async fn test_unknown_path_through_main() {
        let (status, _, body) = send("GET", "/unknown", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Function not found");
        assert_eq!(json["path"], "/unknown");
    }

    #[tokio::test]
    async fn test_unknown_function_name_falls_back_to_main() {
        let (status, _, body) = send("POST", "/functions/v1/nope", "{}").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["path"], "/functions/v1/nope");
    }

    #[tokio::test]
    async fn test_hello_world_greets() {
        let (status, headers, body) = send("POST", "/functions/v1/hello-world", r#"{"name":"Ada"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["access-control-allow-origin"], "*");

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["message"], "Hello Ada!");
        assert_eq!(json["method"], "POST");
        assert_eq!(json["url"], "http://localhost:8000/functions/v1/hello-world");
    }

    #[tokio::test]
    async fn test_hello_world_unparseable_body() {
        let (status, _, body) = send("POST", "/functions/v1/hello-world/extra", "not json").await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["message"], "Hello World!");
    }

    #[tokio::test]
    async fn test_hello_world_preflight() {
        let (status, headers, body) = send("OPTIONS", "/functions/v1/hello-world", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert!(body.is_empty());
    }

    #[test]
    fn test_invalid_function_status_becomes_server_error() {
        let response = into_http_response(edge_functions_sdk::Response::new(42).with_body("ignored"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = into_http_response(edge_functions_sdk::Response::new(204));
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_absolute_url_honours_forwarded_proto() {
        let request = Request::builder()
            .uri("/functions/v1/hello-world?x=1")
            .header("host", "edge.example.com")
            .header("x-forwarded-proto", "https")
            .body(Body::empty())
            .unwrap();

        assert_eq!(absolute_url(&request), "https://edge.example.com/functions/v1/hello-world?x=1");
    }
}
