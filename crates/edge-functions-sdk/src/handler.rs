//! Function registration records
//!
//! Each function crate exports a [`Function`] describing its name, the line it
//! logs when installed, and its entry point. Hosts install a function once and
//! then call it once per request.
//!
//! # Example
//!
//! ```ignore
//! use edge_functions_sdk::prelude::*;
//!
//! pub fn handle(req: Request) -> Response {
//!     Response::ok(json!({"path": req.path}))
//! }
//!
//! pub const FUNCTION: Function = Function::new("echo", "Echo function started", handle);
//! ```

use crate::{Request, Response};

/// Type alias for the handler function signature
pub type HandlerFn = fn(Request) -> Response;

/// A named edge function
#[derive(Debug, Clone, Copy)]
pub struct Function {
    /// Name the host routes by (e.g. "hello-world")
    pub name: &'static str,

    /// Logged once when the function is installed
    pub startup_message: &'static str,

    handler: HandlerFn,
}

impl Function {
    pub const fn new(name: &'static str, startup_message: &'static str, handler: HandlerFn) -> Self {
        Self { name, startup_message, handler }
    }

    /// Install the function with a host, emitting its startup log line.
    ///
    /// Hosts call this exactly once per registration; it is never called per request.
    pub fn install(self) -> Self {
        tracing::info!(function = self.name, "{}", self.startup_message);
        self
    }

    /// Invoke the function for one request.
    pub fn call(&self, req: Request) -> Response {
        (self.handler)(req)
    }

    /// The raw entry point, for moving onto another thread.
    pub fn handler(&self) -> HandlerFn {
        self.handler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn with_captured_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        logs.contents()
    }

    fn echo_path(req: Request) -> Response {
        Response::ok(serde_json::json!({ "path": req.path }))
    }

    #[test]
    fn test_call_dispatches_to_handler() {
        let function = Function::new("echo", "Echo function started", echo_path).install();
        let response = function.call(Request::new("GET", "http://localhost/abc"));
        assert_eq!(response.status, 200);
        assert_eq!(response.body.as_deref(), Some(r#"{"path":"/abc"}"#));
    }

    #[test]
    fn test_startup_line_logged_once_per_install() {
        let output = with_captured_logs(|| {
            let function = Function::new("echo", "Echo function started", echo_path).install();
            for path in ["a", "b", "c"] {
                function.call(Request::new("GET", format!("http://localhost/{}", path)));
            }
        });

        assert_eq!(output.matches("Echo function started").count(), 1);
    }

    #[test]
    fn test_stdio_loop_installs_once() {
        let mut input = Vec::new();
        for path in ["a", "b"] {
            let payload = serde_json::to_vec(&Request::new("GET", format!("http://localhost/{}", path))).unwrap();
            input.extend((payload.len() as u32).to_be_bytes());
            input.extend(payload);
        }

        let output = with_captured_logs(|| {
            let function = Function::new("echo", "Echo function started", echo_path);
            crate::ipc::serve(function, &mut Cursor::new(input), &mut Vec::new()).unwrap();
        });

        assert_eq!(output.matches("Echo function started").count(), 1);
    }
}
