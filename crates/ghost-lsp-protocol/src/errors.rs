//! Standard JSON-RPC / LSP error codes (spec.md §7).

/// Parse error: invalid JSON was received by the server.
pub const PARSE_ERROR: i32 = -32700;
/// The JSON sent is not a valid request object.
pub const INVALID_REQUEST: i32 = -32600;
/// The method does not exist or is not available.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Invalid method parameters.
pub const INVALID_PARAMS: i32 = -32602;
/// Internal JSON-RPC error.
pub const INTERNAL_ERROR: i32 = -32603;
/// A request was received before the server finished `initialize`/`initialized`.
pub const SERVER_NOT_INITIALIZED: i32 = -32002;

use crate::jsonrpc::JsonRpcError;

impl JsonRpcError {
    /// `-32700 ParseError`.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(PARSE_ERROR, message)
    }

    /// `-32600 InvalidRequest`.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, message)
    }

    /// `-32601 MethodNotFound`.
    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("method not found: {method}"))
    }

    /// `-32602 InvalidParams`.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    /// `-32603 InternalError`.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }

    /// `-32002 ServerNotInitialized`.
    pub fn not_initialized() -> Self {
        Self::new(SERVER_NOT_INITIALIZED, "server not initialized")
    }
}
