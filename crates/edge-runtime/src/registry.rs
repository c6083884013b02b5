//! Function registry
//!
//! Holds the functions deployed in this runtime, keyed by name, plus the
//! `main` function that answers everything else. Functions are installed when
//! registered and executed on the blocking pool under a timeout.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, Result};
use edge_functions_sdk::{Function, Request, Response};

pub struct FunctionRegistry {
    functions: HashMap<&'static str, Function>,
    fallback: Function,
}

impl FunctionRegistry {
    /// Create a registry whose unmatched requests go to `fallback`.
    pub fn new(fallback: Function) -> Self {
        Self {
            functions: HashMap::new(),
            fallback: fallback.install(),
        }
    }

    /// Register and install a function under its name
    pub fn register(&mut self, function: Function) {
        let function = function.install();
        if self.functions.insert(function.name, function).is_some() {
            tracing::warn!(function = function.name, "Replaced previously registered function");
        }
    }

    /// Look up a function by name, if deployed
    pub fn get(&self, name: &str) -> Option<Function> {
        self.functions.get(name).copied()
    }

    /// The function serving unmatched requests
    pub fn fallback(&self) -> Function {
        self.fallback
    }

    /// Names of the registered functions, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Execute a function with a timeout
    pub async fn execute_with_timeout(
        &self,
        function: Function,
        req: Request,
        timeout: Duration,
    ) -> Result<Response> {
        let entry = function.handler();

        let future = tokio::task::spawn_blocking(move || entry(req));

        match tokio::time::timeout(timeout, future).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(anyhow!("Function {} panicked: {}", function.name, e)),
            Err(_) => Err(anyhow!("Function {} timed out", function.name)),
        }
    }
}
