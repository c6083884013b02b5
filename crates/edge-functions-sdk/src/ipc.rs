//! IPC protocol for running a function under a process-based host.
//!
//! Functions communicate with the host using a simple length-prefixed JSON
//! protocol over stdin/stdout: a 4-byte big-endian length, then that many
//! bytes of JSON. Logs go to stderr so they never interleave with frames.
//!
//! # Example
//! ```ignore
//! use edge_functions_sdk::prelude::*;
//!
//! fn handle(req: Request) -> Response {
//!     Response::ok(json!({"path": req.path}))
//! }
//!
//! const FUNCTION: Function = Function::new("echo", "Echo function started", handle);
//!
//! handler_loop!(FUNCTION);
//! ```

use crate::{Function, HandlerError, Request, Response};
use std::io::{self, ErrorKind, Read, Write};

/// Read one framed request. Returns `Ok(None)` on a clean EOF before a new frame.
pub fn read_request<R: Read>(reader: &mut R) -> Result<Option<Request>, HandlerError> {
    // Read length prefix (4 bytes, big-endian)
    let mut len_buf = [0u8; 4];
    loop {
        match reader.read(&mut len_buf[..1]) {
            Ok(0) => return Ok(None),
            Ok(_) => break,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(HandlerError::IpcError(format!("Failed to read length prefix: {}", e))),
        }
    }
    reader.read_exact(&mut len_buf[1..])
        .map_err(|e| HandlerError::IpcError(format!("Truncated length prefix: {}", e)))?;

    let len = u32::from_be_bytes(len_buf) as usize;

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload)
        .map_err(|e| HandlerError::IpcError(format!("Failed to read payload: {}", e)))?;

    serde_json::from_slice(&payload)
        .map(Some)
        .map_err(|e| HandlerError::IpcError(format!("Failed to parse request: {}", e)))
}

/// Write one framed response.
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<(), HandlerError> {
    let payload = serde_json::to_vec(response)
        .map_err(|e| HandlerError::IpcError(format!("Failed to serialize response: {}", e)))?;

    let len = u32::try_from(payload.len())
        .map_err(|_| HandlerError::IpcError("Response exceeds frame size".into()))?;

    writer.write_all(&len.to_be_bytes())
        .map_err(|e| HandlerError::IpcError(format!("Failed to write length: {}", e)))?;
    writer.write_all(&payload)
        .map_err(|e| HandlerError::IpcError(format!("Failed to write payload: {}", e)))?;
    writer.flush()
        .map_err(|e| HandlerError::IpcError(format!("Failed to flush: {}", e)))?;

    Ok(())
}

/// Install `function` and answer framed requests from `reader` until EOF.
pub fn serve<R: Read, W: Write>(function: Function, reader: &mut R, writer: &mut W) -> Result<(), HandlerError> {
    let function = function.install();

    while let Some(req) = read_request(reader)? {
        tracing::debug!(request_id = %req.request_id, method = %req.method, "Handling request");
        let response = function.call(req);
        write_response(writer, &response)?;
    }

    Ok(())
}

/// Run `function` against the process's stdin/stdout.
pub fn serve_stdio(function: Function) -> Result<(), HandlerError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(function, &mut stdin.lock(), &mut stdout.lock())
}

/// Send log output to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

/// Generate a `main` that serves a [`Function`] over stdin/stdout.
///
/// # Example
/// ```ignore
/// handler_loop!(my_function::FUNCTION);
/// ```
#[macro_export]
macro_rules! handler_loop {
    ($function:expr) => {
        fn main() {
            $crate::ipc::init_stderr_logging();
            if let Err(e) = $crate::ipc::serve_stdio($function) {
                $crate::tracing::error!("Function loop stopped: {}", e);
                ::std::process::exit(1);
            }
        }
    };
}
