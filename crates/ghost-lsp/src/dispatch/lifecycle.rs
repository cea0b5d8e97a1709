//! Lifecycle requests/notifications: `initialize`, `initialized`,
//! `shutdown`, `exit` (spec.md §4.8).

use crate::server::{Lifecycle, LspServer};
use ghost_lsp_protocol::{capabilities, JsonRpcError, JsonRpcResponse};
use lsp_types::{InitializeParams, InitializeResult};
use serde_json::Value;

pub fn initialize(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params = params.unwrap_or_else(|| serde_json::json!({"capabilities": {}}));
    let init: InitializeParams = match serde_json::from_value(params) {
        Ok(init) => init,
        Err(e) => return JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string())),
    };

    let root = init
        .root_uri
        .as_ref()
        .and_then(|uri| ghost_lsp_uri::uri_to_fs_path(uri.as_str()))
        .or_else(|| {
            init.workspace_folders
                .as_ref()
                .and_then(|folders| folders.first())
                .and_then(|folder| ghost_lsp_uri::uri_to_fs_path(folder.uri.as_str()))
        });

    if let Some(root) = &root {
        for file in crate::workspace::scan(root) {
            server.logger.debug(format!("discovered {}", file.uri));
        }
    }
    server.workspace_root = root;

    server.lifecycle = Lifecycle::Initialized;
    server.logger.info("initialized");

    let result = InitializeResult {
        capabilities: capabilities::server_capabilities(),
        server_info: Some(capabilities::server_info()),
    };
    JsonRpcResponse::success(id, serde_json::to_value(result).unwrap_or(Value::Null))
}

pub fn initialized(server: &mut LspServer) {
    server.logger.debug("client acknowledged initialize");
}

pub fn shutdown(server: &mut LspServer, id: Option<Value>) -> JsonRpcResponse {
    server.lifecycle = Lifecycle::ShutdownRequested;
    server.exit_code = 0;
    server.logger.info("shutdown requested");
    JsonRpcResponse::success(id, Value::Null)
}

pub fn exit(server: &mut LspServer) {
    if server.lifecycle != Lifecycle::ShutdownRequested {
        server.exit_code = 1;
        server.logger.warn("exit received without a prior shutdown");
    }
    server.lifecycle = Lifecycle::Exited;
}
