//! Serves the main function over the stdio protocol
edge_functions_sdk::handler_loop!(handler_main::FUNCTION);
