//! Request/notification routing and lifecycle gating (spec.md §4.8).

mod lifecycle;
mod text_document;
mod workspace;

use crate::server::{Lifecycle, LspServer};
use ghost_lsp_protocol::{methods, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use serde_json::Value;

/// Route one message to its handler, gated by the current lifecycle state.
pub fn dispatch(server: &mut LspServer, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    let id = request.id.clone();
    let is_request = id.is_some();

    match server.lifecycle {
        Lifecycle::Starting if request.method != methods::INITIALIZE && request.method != methods::EXIT => {
            return error_response(is_request, id, JsonRpcError::not_initialized());
        }
        Lifecycle::Initialized if request.method == methods::INITIALIZE => {
            return error_response(
                is_request,
                id,
                JsonRpcError::invalid_request("already initialized"),
            );
        }
        Lifecycle::ShutdownRequested
            if request.method != methods::EXIT && request.method != methods::SHUTDOWN =>
        {
            return error_response(
                is_request,
                id,
                JsonRpcError::invalid_request(format!("only exit is accepted after shutdown, got {}", request.method)),
            );
        }
        Lifecycle::Exited => return None,
        _ => {}
    }

    match request.method.as_str() {
        methods::INITIALIZE => Some(lifecycle::initialize(server, id, request.params)),
        methods::INITIALIZED => {
            lifecycle::initialized(server);
            None
        }
        methods::SHUTDOWN => Some(lifecycle::shutdown(server, id)),
        methods::EXIT => {
            lifecycle::exit(server);
            None
        }
        methods::SET_TRACE | methods::CANCEL_REQUEST => None,

        methods::TEXT_DOCUMENT_DID_OPEN => {
            text_document::did_open(server, request.params);
            None
        }
        methods::TEXT_DOCUMENT_DID_CHANGE => {
            text_document::did_change(server, request.params);
            None
        }
        methods::TEXT_DOCUMENT_DID_SAVE => None,
        methods::TEXT_DOCUMENT_DID_CLOSE => {
            text_document::did_close(server, request.params);
            None
        }

        methods::TEXT_DOCUMENT_HOVER => Some(text_document::hover(server, id, request.params)),
        methods::TEXT_DOCUMENT_DEFINITION => Some(text_document::definition(server, id, request.params)),
        methods::TEXT_DOCUMENT_REFERENCES => Some(text_document::references(server, id, request.params)),
        methods::TEXT_DOCUMENT_DOCUMENT_SYMBOL => Some(text_document::document_symbol(server, id, request.params)),
        methods::TEXT_DOCUMENT_COMPLETION => Some(text_document::completion(server, id, request.params)),
        methods::TEXT_DOCUMENT_SEMANTIC_TOKENS_FULL => {
            Some(text_document::semantic_tokens_full(server, id, request.params))
        }
        methods::TEXT_DOCUMENT_CODE_ACTION => Some(text_document::code_action(server, id, request.params)),
        methods::TEXT_DOCUMENT_RENAME => Some(text_document::rename(server, id, request.params)),
        methods::TEXT_DOCUMENT_PREPARE_RENAME => Some(text_document::prepare_rename(server, id, request.params)),
        methods::TEXT_DOCUMENT_SIGNATURE_HELP => Some(text_document::signature_help(server, id, request.params)),
        methods::TEXT_DOCUMENT_INLAY_HINT => Some(text_document::inlay_hint(server, id, request.params)),
        methods::TEXT_DOCUMENT_SELECTION_RANGE => Some(text_document::selection_range(server, id, request.params)),
        methods::TEXT_DOCUMENT_DOCUMENT_HIGHLIGHT => {
            Some(text_document::document_highlight(server, id, request.params))
        }
        methods::TEXT_DOCUMENT_FOLDING_RANGE => Some(text_document::folding_range(server, id, request.params)),

        methods::WORKSPACE_SYMBOL => Some(workspace::symbol(server, id, request.params)),
        methods::WORKSPACE_DID_CHANGE_CONFIGURATION => {
            workspace::did_change_configuration(server, request.params);
            None
        }
        methods::WORKSPACE_DID_CHANGE_WATCHED_FILES => {
            workspace::did_change_watched_files(server, request.params);
            None
        }

        other => {
            if is_request {
                Some(JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)))
            } else {
                server.logger.debug(format!("ignoring unknown notification: {other}"));
                None
            }
        }
    }
}

fn error_response(is_request: bool, id: Option<Value>, error: JsonRpcError) -> Option<JsonRpcResponse> {
    if is_request {
        Some(JsonRpcResponse::error(id, error))
    } else {
        None
    }
}

/// Parse `params` as `T`, producing an `InvalidParams` response on failure.
pub(crate) fn parse_params<T: serde::de::DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("missing params"))?;
    serde_json::from_value(params).map_err(|e| JsonRpcError::invalid_params(e.to_string()))
}
