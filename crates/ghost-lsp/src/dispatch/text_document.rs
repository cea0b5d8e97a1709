//! `textDocument/*` notifications and analysis-provider requests
//! (spec.md §4.4, §4.7).

use crate::dispatch::parse_params;
use crate::document::Document;
use crate::server::LspServer;
use ghost_lsp_protocol::{methods, JsonRpcError, JsonRpcResponse};
use ghost_lsp_providers::DocumentContext;
use ghost_syntax::LanguageKind;
use lsp_types::{
    CodeActionParams, CompletionParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, DocumentHighlightParams, DocumentSymbolParams, FoldingRangeParams, HoverParams,
    InlayHintParams, Location, PublishDiagnosticsParams, ReferenceParams, RenameParams, SelectionRangeParams,
    SemanticTokens, SemanticTokensParams, SemanticTokensResult, SignatureHelpParams, TextDocumentPositionParams, Url,
};
use serde_json::Value;

fn ctx_for<'a>(doc: &'a Document) -> DocumentContext<'a> {
    DocumentContext {
        uri: &doc.uri,
        text: &doc.text,
        tree: doc.tree.as_ref(),
        line_index: &doc.line_index,
        language_kind: doc.language_kind,
    }
}

fn ok(id: Option<Value>, value: impl serde::Serialize) -> JsonRpcResponse {
    JsonRpcResponse::success(id, serde_json::to_value(value).unwrap_or(Value::Null))
}

fn unknown_document(id: Option<Value>, uri: &str) -> JsonRpcResponse {
    JsonRpcResponse::error(id, JsonRpcError::invalid_params(format!("document not open: {uri}")))
}

/// Recompute and queue `textDocument/publishDiagnostics` for `uri`
/// (spec.md §5: emitted before the reply to the request that triggered it).
fn publish_diagnostics(server: &mut LspServer, uri: &str) {
    let Some(doc) = server.documents.get(uri) else {
        return;
    };
    let diagnostics = if doc.language_kind == LanguageKind::SmartContract {
        server.analyzer.analyze(&doc.text, &doc.line_index)
    } else {
        ghost_lsp_providers::diagnostics(&ctx_for(doc))
    };
    let Ok(url) = Url::parse(uri) else {
        return;
    };
    let params = PublishDiagnosticsParams { uri: url, diagnostics, version: Some(doc.version) };
    server.outgoing.push((
        methods::TEXT_DOCUMENT_PUBLISH_DIAGNOSTICS.to_string(),
        serde_json::to_value(params).unwrap_or(Value::Null),
    ));
}

fn reindex_workspace_symbols(server: &mut LspServer, uri: &str) {
    if let Some(doc) = server.documents.get(uri) {
        let ctx = ctx_for(doc);
        server.workspace_symbols.reindex(&ctx);
    }
}

pub fn did_open(server: &mut LspServer, params: Option<Value>) {
    let Ok(params) = parse_params::<DidOpenTextDocumentParams>(params) else {
        return;
    };
    let uri = params.text_document.uri.to_string();
    let already_open = server.documents.open(uri.clone(), params.text_document.text, params.text_document.version);
    if already_open {
        server.logger.warn(format!("didOpen for already-open document: {uri}"));
    }
    reindex_workspace_symbols(server, &uri);
    publish_diagnostics(server, &uri);
}

pub fn did_change(server: &mut LspServer, params: Option<Value>) {
    let Ok(params) = parse_params::<DidChangeTextDocumentParams>(params) else {
        return;
    };
    let uri = params.text_document.uri.to_string();
    if let Err(e) = server.documents.update(&uri, params.content_changes, params.text_document.version) {
        server.logger.warn(format!("didChange for unknown document: {e}"));
        return;
    }
    reindex_workspace_symbols(server, &uri);
    publish_diagnostics(server, &uri);
}

pub fn did_close(server: &mut LspServer, params: Option<Value>) {
    let Ok(params) = parse_params::<DidCloseTextDocumentParams>(params) else {
        return;
    };
    let uri = params.text_document.uri.to_string();
    server.documents.close(&uri);
    server.workspace_symbols.remove(&uri);
}

pub fn hover(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: HoverParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let pos = params.text_document_position_params;
    let uri = pos.text_document.uri.to_string();
    let Some(doc) = server.documents.get(&uri) else {
        return unknown_document(id, &uri);
    };
    ok(id, ghost_lsp_providers::hover(&ctx_for(doc), pos.position))
}

pub fn definition(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: lsp_types::GotoDefinitionParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let pos = params.text_document_position_params;
    let uri = pos.text_document.uri.to_string();
    let Some(current) = server.documents.get(&uri) else {
        return unknown_document(id, &uri);
    };

    let searchable: Vec<_> = std::iter::once(current)
        .chain(server.documents.iter().filter(|d| d.uri != uri))
        .map(|d| ghost_lsp_providers::definition::SearchableDocument {
            uri: &d.uri,
            tree: d.tree.as_ref(),
            text: &d.text,
            line_index: &d.line_index,
            language_kind: d.language_kind,
        })
        .collect();

    let location: Option<Location> = ghost_lsp_providers::definition_cross_file(&searchable, pos.position);
    ok(id, location.map(lsp_types::GotoDefinitionResponse::Scalar))
}

pub fn references(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: ReferenceParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let pos = params.text_document_position;
    let uri = pos.text_document.uri.to_string();
    let Some(doc) = server.documents.get(&uri) else {
        return unknown_document(id, &uri);
    };
    let locations = ghost_lsp_providers::references::references(
        &ctx_for(doc),
        pos.position,
        params.context.include_declaration,
    );
    ok(id, locations)
}

pub fn document_symbol(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: DocumentSymbolParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let uri = params.text_document.uri.to_string();
    let Some(doc) = server.documents.get(&uri) else {
        return unknown_document(id, &uri);
    };
    let symbols = ghost_lsp_providers::document_symbols(&ctx_for(doc));
    ok(id, lsp_types::DocumentSymbolResponse::Nested(symbols))
}

pub fn completion(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: CompletionParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let pos = params.text_document_position;
    let uri = pos.text_document.uri.to_string();
    let Some(doc) = server.documents.get(&uri) else {
        return unknown_document(id, &uri);
    };
    let items = ghost_lsp_providers::completion(&ctx_for(doc), pos.position);
    ok(id, lsp_types::CompletionResponse::Array(items))
}

pub fn semantic_tokens_full(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: SemanticTokensParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let uri = params.text_document.uri.to_string();
    let Some(doc) = server.documents.get(&uri) else {
        return unknown_document(id, &uri);
    };
    let tokens = ghost_lsp_providers::semantic_tokens(&ctx_for(doc));
    let data = ghost_lsp_providers::encode_delta(&tokens);
    ok(
        id,
        SemanticTokensResult::Tokens(SemanticTokens { result_id: None, data: decode_raw_tokens(&data) }),
    )
}

fn decode_raw_tokens(data: &[u32]) -> Vec<lsp_types::SemanticToken> {
    data.chunks_exact(5)
        .map(|c| lsp_types::SemanticToken {
            delta_line: c[0],
            delta_start: c[1],
            length: c[2],
            token_type: c[3],
            token_modifiers_bitset: c[4],
        })
        .collect()
}

pub fn code_action(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: CodeActionParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let uri = params.text_document.uri.to_string();
    let Some(doc) = server.documents.get(&uri) else {
        return unknown_document(id, &uri);
    };
    let actions = ghost_lsp_providers::code_actions(&ctx_for(doc));
    let response: Vec<lsp_types::CodeActionOrCommand> =
        actions.into_iter().map(lsp_types::CodeActionOrCommand::CodeAction).collect();
    ok(id, response)
}

pub fn rename(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: RenameParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let pos = params.text_document_position;
    let uri = pos.text_document.uri.to_string();
    if server.documents.get(&uri).is_none() {
        return unknown_document(id, &uri);
    }

    let mut docs: Vec<_> = server.documents.iter().collect();
    docs.sort_by_key(|d| if d.uri == uri { 0 } else { 1 });
    let renameable: Vec<_> = docs
        .into_iter()
        .map(|d| ghost_lsp_providers::rename::RenameDocument {
            uri: &d.uri,
            text: &d.text,
            tree: d.tree.as_ref(),
            line_index: &d.line_index,
            language_kind: d.language_kind,
        })
        .collect();

    ok(id, ghost_lsp_providers::rename(&renameable, pos.position, &params.new_name))
}

pub fn prepare_rename(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: TextDocumentPositionParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let uri = params.text_document.uri.to_string();
    let Some(doc) = server.documents.get(&uri) else {
        return unknown_document(id, &uri);
    };
    let range = ghost_lsp_providers::prepare_rename(&ctx_for(doc), params.position);
    ok(id, range.map(lsp_types::PrepareRenameResponse::Range))
}

pub fn signature_help(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: SignatureHelpParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let pos = params.text_document_position_params;
    let uri = pos.text_document.uri.to_string();
    let Some(doc) = server.documents.get(&uri) else {
        return unknown_document(id, &uri);
    };
    ok(id, ghost_lsp_providers::signature_help(&ctx_for(doc), pos.position))
}

pub fn inlay_hint(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: InlayHintParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let uri = params.text_document.uri.to_string();
    let Some(doc) = server.documents.get(&uri) else {
        return unknown_document(id, &uri);
    };
    ok(id, ghost_lsp_providers::inlay_hints(&ctx_for(doc), params.range))
}

pub fn selection_range(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: SelectionRangeParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let uri = params.text_document.uri.to_string();
    let Some(doc) = server.documents.get(&uri) else {
        return unknown_document(id, &uri);
    };
    let ctx = ctx_for(doc);
    let ranges: Vec<Option<lsp_types::SelectionRange>> =
        params.positions.into_iter().map(|p| ghost_lsp_providers::selection_range(&ctx, p)).collect();
    ok(id, ranges)
}

pub fn document_highlight(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: DocumentHighlightParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let pos = params.text_document_position_params;
    let uri = pos.text_document.uri.to_string();
    let Some(doc) = server.documents.get(&uri) else {
        return unknown_document(id, &uri);
    };
    let highlights: Vec<lsp_types::DocumentHighlight> = ghost_lsp_providers::document_highlight(&ctx_for(doc), pos.position)
        .into_iter()
        .map(|(range, is_write)| lsp_types::DocumentHighlight {
            range,
            kind: Some(if is_write { lsp_types::DocumentHighlightKind::WRITE } else { lsp_types::DocumentHighlightKind::READ }),
        })
        .collect();
    ok(id, highlights)
}

pub fn folding_range(server: &mut LspServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: FoldingRangeParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::error(id, e),
    };
    let uri = params.text_document.uri.to_string();
    let Some(doc) = server.documents.get(&uri) else {
        return unknown_document(id, &uri);
    };
    ok(id, ghost_lsp_providers::folding_ranges(&ctx_for(doc)))
}
