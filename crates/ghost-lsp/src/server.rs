//! Server loop and lifecycle state machine (spec.md §4.8).

use crate::config::ServerConfig;
use crate::dispatch;
use crate::document::DocumentStore;
use crate::semantic_analyzer::{LintAnalyzer, SemanticAnalyzer};
use crate::watcher::FileWatcher;
use ghost_lsp_protocol::{JsonRpcRequest, JsonRpcResponse};
use ghost_lsp_providers::WorkspaceSymbolIndex;
use ghost_lsp_transport::{read_message, write_message, write_notification, Frame, Logger, TransportError};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// The server's position in the spec.md §4.8 state table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Before `initialize` has been answered.
    Starting,
    /// After `initialize`/`initialized`; requests dispatch normally.
    Initialized,
    /// After `shutdown`; only `exit` is accepted.
    ShutdownRequested,
    /// After `exit`; the server loop has stopped.
    Exited,
}

/// The running server: lifecycle state plus every piece of mutable state
/// spec.md §5 says is owned by the loop (no shared locks needed).
pub struct LspServer {
    pub(crate) lifecycle: Lifecycle,
    pub(crate) documents: DocumentStore,
    pub(crate) workspace_symbols: WorkspaceSymbolIndex,
    pub(crate) workspace_root: Option<PathBuf>,
    pub(crate) watcher: FileWatcher,
    pub(crate) config: ServerConfig,
    pub(crate) logger: Logger,
    pub(crate) analyzer: Box<dyn SemanticAnalyzer>,
    /// Notifications queued by a handler (currently only
    /// `textDocument/publishDiagnostics`), drained by the caller after
    /// `handle_message` returns — spec.md §5's ordering guarantee that a
    /// mutation's diagnostics are emitted before the reply to the request
    /// that caused it.
    pub(crate) outgoing: Vec<(String, serde_json::Value)>,
    /// Set by `exit`; `0` after a clean `shutdown`, `1` otherwise.
    pub(crate) exit_code: i32,
}

impl LspServer {
    /// Construct a fresh server at the `Starting` state.
    pub fn new(config: ServerConfig) -> Self {
        let logger = Logger::new("ghost-lsp", config.log_level);
        Self {
            lifecycle: Lifecycle::Starting,
            documents: DocumentStore::new(),
            workspace_symbols: WorkspaceSymbolIndex::new(),
            workspace_root: None,
            watcher: FileWatcher::new(),
            config,
            logger,
            analyzer: Box::new(LintAnalyzer),
            outgoing: Vec::new(),
            exit_code: 1,
        }
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Process one JSON-RPC message, returning a response for requests
    /// (`id.is_some()`) and `None` for notifications.
    pub fn handle_message(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        dispatch::dispatch(self, request)
    }

    /// Drain notifications queued by the last `handle_message` call.
    pub fn take_outgoing(&mut self) -> Vec<(String, serde_json::Value)> {
        std::mem::take(&mut self.outgoing)
    }

    /// Run the server against `reader`/`writer`, framing every message per
    /// the LSP Base Protocol, until `exit` is processed or stdin reaches
    /// EOF (spec.md §7: "stdin EOF" is a fatal condition).
    pub fn run<R: BufRead, W: Write>(&mut self, reader: &mut R, writer: &mut W) -> Result<i32, TransportError> {
        loop {
            match read_message(reader)? {
                Frame::Eof => {
                    self.logger.warn("stdin closed; exiting");
                    return Ok(1);
                }
                Frame::Message(request) => {
                    let is_request = request.id.is_some();
                    let response = self.handle_message(request);
                    for (method, params) in self.take_outgoing() {
                        write_notification(writer, &method, params)?;
                    }
                    if is_request {
                        if let Some(response) = response {
                            write_message(writer, &response)?;
                        }
                    }
                    if self.lifecycle == Lifecycle::Exited {
                        return Ok(self.exit_code);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(id: Option<serde_json::Value>, method: &str, params: serde_json::Value) -> JsonRpcRequest {
        serde_json::from_value(json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params})).unwrap()
    }

    #[test]
    fn starts_in_starting_state() {
        let server = LspServer::new(ServerConfig::default());
        assert_eq!(server.lifecycle(), Lifecycle::Starting);
    }

    #[test]
    fn request_before_initialize_is_rejected() {
        let mut server = LspServer::new(ServerConfig::default());
        let response = server.handle_message(request(Some(json!(1)), "textDocument/hover", json!({}))).unwrap();
        assert_eq!(response.error.unwrap().code, -32002);
    }

    #[test]
    fn initialize_then_initialized_unlocks_dispatch() {
        let mut server = LspServer::new(ServerConfig::default());
        server.handle_message(request(Some(json!(1)), "initialize", json!({"capabilities": {}}))).unwrap();
        assert_eq!(server.lifecycle(), Lifecycle::Initialized);
        server.handle_message(request(None, "initialized", json!({})));
        assert_eq!(server.lifecycle(), Lifecycle::Initialized);
    }
}
