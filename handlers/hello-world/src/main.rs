//! Serves the hello-world function over the stdio protocol
edge_functions_sdk::handler_loop!(handler_hello_world::FUNCTION);
