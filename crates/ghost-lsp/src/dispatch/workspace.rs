//! `workspace/*` requests and notifications (spec.md §4.7.7, §4.9).

use crate::dispatch::parse_params;
use crate::server::LspServer;
use ghost_lsp_protocol::JsonRpcResponse;
use ghost_lsp_transport::Logger;
use lsp_types::{DidChangeConfigurationParams, DidChangeWatchedFilesParams, FileChangeType, WorkspaceSymbolParams};
use serde_json::Value;

pub fn symbol(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: WorkspaceSymbolParams = match parse_params(params) {
        Ok(params) => params,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let symbols = server.workspace_symbols.query(&params.query);
    JsonRpcResponse::success(id, serde_json::to_value(symbols).unwrap_or(Value::Null))
}

pub fn did_change_configuration(server: &mut LspServer, params: Option<Value>) {
    let Ok(params) = parse_params::<DidChangeConfigurationParams>(params) else {
        return;
    };
    server.config.apply_settings(&params.settings);
    server.logger = Logger::new("ghost-lsp", server.config.log_level);
}

pub fn did_change_watched_files(server: &mut LspServer, params: Option<Value>) {
    let Ok(params) = parse_params::<DidChangeWatchedFilesParams>(params) else {
        return;
    };
    for change in params.changes {
        let uri = change.uri.to_string();
        if change.typ == FileChangeType::DELETED {
            server.documents.close(&uri);
            server.workspace_symbols.remove(&uri);
            continue;
        }
        if let Some(path) = ghost_lsp_uri::uri_to_fs_path(&uri) {
            server.watcher.register(uri, path);
        }
    }
    for change in server.watcher.check_for_changes() {
        server.logger.debug(format!("watched file changed: {change:?}"));
    }
}
