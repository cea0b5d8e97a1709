//! Smart-contract lint passes (spec.md §4.7.1), run only for
//! `LanguageKind::SmartContract` documents, which carry no syntax tree.
//! Each pass is best-effort and falls back silently when it doesn't
//! recognize the surrounding shape, per spec.md's "best-effort, fall back
//! silently when node kinds are unfamiliar".

use crate::context::{byte_range_to_lsp, to_lsp_severity};
use ghost_diagnostics_codes::DiagnosticCode;
use ghost_lsp_position::LineIndex;
use lsp_types::Diagnostic;
use std::collections::HashMap;

/// Run every contract lint over `text` and return their combined diagnostics.
pub fn lint(text: &str, line_index: &LineIndex) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    out.extend(reentrancy_risk(text, line_index));
    out.extend(redundant_storage_reads(text, line_index));
    out.extend(missing_access_control(text, line_index));
    out.extend(unchecked_arithmetic(text, line_index));
    out.extend(timestamp_dependence(text, line_index));
    out
}

fn diagnostic(line_index: &LineIndex, start: usize, end: usize, code: DiagnosticCode, message: String) -> Diagnostic {
    Diagnostic {
        range: byte_range_to_lsp(line_index, start, end),
        severity: Some(to_lsp_severity(code.severity())),
        code: Some(lsp_types::NumberOrString::String(code.as_str().to_string())),
        code_description: None,
        source: Some("ghost-lsp".to_string()),
        message,
        related_information: None,
        tags: None,
        data: None,
    }
}

/// An external call (`call(...)`/`transfer(...)`) followed, within the same
/// function body, by a storage write — the classic reentrancy shape.
fn reentrancy_risk(text: &str, line_index: &LineIndex) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for func in function_bodies(text) {
        let Some(call_pos) = first_of(&func.body, &["call(", "transfer("]) else { continue };
        let Some(write_pos) = first_of(&func.body[call_pos..], &["storage.set(", "storage.write("]) else {
            continue;
        };
        let start = func.body_start + call_pos;
        out.push(diagnostic(
            line_index,
            start,
            start + write_pos.min(func.body.len()),
            DiagnosticCode::ReentrancyRisk,
            "external call precedes a state write; consider the checks-effects-interactions pattern".to_string(),
        ));
    }
    out
}

/// The same storage subscript read three or more times within one function.
fn redundant_storage_reads(text: &str, line_index: &LineIndex) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for func in function_bodies(text) {
        let mut counts: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut search_from = 0;
        while let Some(rel) = func.body[search_from..].find("storage.get(") {
            let start = search_from + rel;
            let args_start = start + "storage.get(".len();
            let close = func.body[args_start..].find(')').map(|i| args_start + i).unwrap_or(func.body.len());
            let key = func.body[args_start..close].trim();
            counts.entry(key).or_default().push(start);
            search_from = close.max(start + 1);
        }
        for (_, positions) in counts {
            if positions.len() >= 3 {
                let start = func.body_start + positions[positions.len() - 1];
                out.push(diagnostic(
                    line_index,
                    start,
                    start + "storage.get(".len(),
                    DiagnosticCode::RedundantStorageRead,
                    "same storage key read 3+ times; consider caching it in a local".to_string(),
                ));
            }
        }
    }
    out
}

/// A top-level function that writes storage but never checks `msg.sender`/a role.
fn missing_access_control(text: &str, line_index: &LineIndex) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for func in function_bodies(text) {
        let mutates = func.body.contains("storage.set(") || func.body.contains("storage.write(");
        let guarded = func.body.contains("msg.sender") || func.body.contains("require(") || func.body.contains("onlyOwner");
        if mutates && !guarded {
            out.push(diagnostic(
                line_index,
                func.name_start,
                func.name_start + func.name.len(),
                DiagnosticCode::MissingAccessControl,
                format!("`{}` mutates storage with no caller/role check", func.name),
            ));
        }
    }
    out
}

/// An assignment containing arithmetic with no neighbouring `require`/`assert`.
fn unchecked_arithmetic(text: &str, line_index: &LineIndex) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for func in function_bodies(text) {
        let guarded = func.body.contains("require(") || func.body.contains("assert(");
        for (line_no, line) in func.body.lines().enumerate() {
            let has_assignment = line.contains('=') && !line.contains("==");
            let has_arith = line.contains('+') || line.contains('-') || line.contains('*');
            if has_assignment && has_arith && !guarded {
                let line_start = func.body_start + func.body.lines().take(line_no).map(|l| l.len() + 1).sum::<usize>();
                out.push(diagnostic(
                    line_index,
                    line_start,
                    line_start + line.len(),
                    DiagnosticCode::UncheckedArithmetic,
                    "arithmetic in an assignment with no neighbouring require/assert".to_string(),
                ));
            }
        }
    }
    out
}

/// `block.timestamp` used in a comparison.
fn timestamp_dependence(text: &str, line_index: &LineIndex) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find("block.timestamp") {
        let start = search_from + rel;
        let end = start + "block.timestamp".len();
        let tail = &text[end..(end + 20).min(text.len())];
        if tail.trim_start().starts_with(['<', '>', '=']) {
            out.push(diagnostic(
                line_index,
                start,
                end,
                DiagnosticCode::TimestampDependence,
                "block timestamp used in a comparison; miners can manipulate it within a tolerance".to_string(),
            ));
        }
        search_from = end;
    }
    out
}

struct FunctionBody<'a> {
    name: &'a str,
    name_start: usize,
    body_start: usize,
    body: &'a str,
}

/// Split `text` into naive `function NAME(...) { BODY }` spans, matching
/// braces textually. Good enough for the lint passes above; not a parser.
fn function_bodies(text: &str) -> Vec<FunctionBody> {
    let mut out = Vec::new();
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find("function ") {
        let keyword_start = search_from + rel;
        let name_start = keyword_start + "function ".len();
        let name_end = text[name_start..]
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .map(|i| name_start + i)
            .unwrap_or(text.len());
        let name = &text[name_start..name_end];

        let Some(open_brace_rel) = text[name_end..].find('{') else {
            search_from = name_end;
            continue;
        };
        let open_brace = name_end + open_brace_rel;
        let mut depth = 0i32;
        let mut close_brace = open_brace;
        for (i, ch) in text[open_brace..].char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        close_brace = open_brace + i;
                        break;
                    }
                }
                _ => {}
            }
        }

        out.push(FunctionBody {
            name,
            name_start,
            body_start: open_brace + 1,
            body: &text[open_brace + 1..close_brace],
        });
        search_from = close_brace + 1;
    }
    out
}
