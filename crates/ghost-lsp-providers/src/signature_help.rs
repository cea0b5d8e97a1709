//! SignatureHelp (spec.md §4.7.13). Trigger characters: `(` and `,`.

use crate::context::DocumentContext;
use ghost_ffi::{builtins::builtin_signatures, catalog};
use lsp_types::{ParameterInformation, ParameterLabel, Position, SignatureHelp, SignatureInformation};

/// Build signature help for the call expression enclosing `position`.
pub fn signature_help(ctx: &DocumentContext, position: Position) -> Option<SignatureHelp> {
    let Some(tree) = ctx.tree else {
        return None;
    };
    let offset = ctx.offset_of(position)?;
    let node = tree.root_node().descendant_for_byte_range(offset, offset)?;

    let call = ancestor_of_kind(node, "call_expression")?;
    let callee = call.child_by_field_name("function")?;
    let callee_name = ctx.node_text(callee);

    let (namespace, name) = split_member(ctx, callee, callee_name);
    let signature = match namespace {
        Some(ns) => catalog().get_function(ns, name).map(|f| from_ffi(ns, f)),
        None => builtin_signatures().get(name).map(from_builtin),
    }?;

    let active_parameter = active_parameter(ctx, call, offset);

    Some(SignatureHelp {
        signatures: vec![signature],
        active_signature: Some(0),
        active_parameter: Some(active_parameter),
    })
}

fn ancestor_of_kind<'a>(node: tree_sitter::Node<'a>, kind: &str) -> Option<tree_sitter::Node<'a>> {
    let mut current = Some(node);
    while let Some(n) = current {
        if n.kind() == kind {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

fn split_member<'a>(ctx: &DocumentContext<'a>, callee: tree_sitter::Node<'a>, full: &'a str) -> (Option<&'a str>, &'a str) {
    if callee.kind() == "member_expression" {
        if let (Some(object), Some(property)) =
            (callee.child_by_field_name("object"), callee.child_by_field_name("property"))
        {
            return (Some(ctx.node_text(object)), ctx.node_text(property));
        }
    }
    (None, full)
}

fn from_ffi(namespace: &str, function: &ghost_ffi::FfiFunction) -> SignatureInformation {
    SignatureInformation {
        label: format!("{namespace}.{}", function.signature),
        documentation: Some(lsp_types::Documentation::String(function.description.clone())),
        parameters: Some(
            function
                .parameters
                .iter()
                .map(|p| ParameterInformation {
                    label: ParameterLabel::Simple(p.name.clone()),
                    documentation: Some(lsp_types::Documentation::String(p.description.clone())),
                })
                .collect(),
        ),
        active_parameter: None,
    }
}

fn from_builtin(entry: &ghost_ffi::builtins::BuiltinSignature) -> SignatureInformation {
    SignatureInformation {
        label: entry.signatures.first().copied().unwrap_or_default().to_string(),
        documentation: Some(lsp_types::Documentation::String(entry.documentation.to_string())),
        parameters: None,
        active_parameter: None,
    }
}

/// Count top-level commas between the call's open parenthesis and `offset`.
fn active_parameter(ctx: &DocumentContext, call: tree_sitter::Node, offset: usize) -> u32 {
    let Some(arguments) = call.child_by_field_name("arguments") else {
        return 0;
    };
    let mut depth = 0i32;
    let mut count = 0u32;
    for (i, ch) in ctx.text[arguments.start_byte()..offset.min(ctx.text.len())].char_indices() {
        let _ = i;
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth <= 1 => count += 1,
            _ => {}
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_lsp_position::LineIndex;
    use ghost_syntax::LanguageKind;

    #[test]
    fn signature_help_for_ffi_function() {
        let text = "shell.exec(\"ls\");\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        };
        let help = signature_help(&ctx, Position { line: 0, character: 12 }).expect("signature help");
        assert!(help.signatures[0].label.contains("shell."));
    }

    #[test]
    fn active_parameter_counts_commas() {
        let text = "arrayPush(xs, 1);\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        };
        let help = signature_help(&ctx, Position { line: 0, character: 15 }).expect("signature help");
        assert_eq!(help.active_parameter, Some(1));
    }
}
