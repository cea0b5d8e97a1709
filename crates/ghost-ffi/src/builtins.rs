//! Baked-in documentation for Ghost's bare (non-namespaced) built-in functions.
//!
//! Mirrors the shape of the FFI catalog (spec.md §4.3) but for functions
//! called directly rather than through a namespace selector, e.g.
//! `arrayPush(xs, 1)` instead of `shell.exec(...)`.

use std::collections::HashMap;
use std::sync::OnceLock;

/// A built-in function's signature and documentation, as rendered by hover
/// (spec.md §4.7.2) and signature help (spec.md §4.7.13).
pub struct BuiltinSignature {
    /// Signature variants, most common first.
    pub signatures: Vec<&'static str>,
    /// One-line description shown in hover/signature-help Markdown.
    pub documentation: &'static str,
}

static BUILTINS: OnceLock<HashMap<&'static str, BuiltinSignature>> = OnceLock::new();

/// The table of bare built-in functions, built once and cached for the
/// lifetime of the process.
pub fn builtin_signatures() -> &'static HashMap<&'static str, BuiltinSignature> {
    BUILTINS.get_or_init(|| {
        let mut signatures = HashMap::new();

        signatures.insert(
            "print",
            BuiltinSignature {
                signatures: vec!["print(value)", "print(value, ...)"],
                documentation: "Writes a textual representation of each argument to standard output.",
            },
        );

        signatures.insert(
            "typeOf",
            BuiltinSignature {
                signatures: vec!["typeOf(value) -> string"],
                documentation: "Returns the runtime type name of `value` (`\"number\"`, `\"string\"`, `\"array\"`, `\"table\"`, `\"function\"`, `\"nil\"`, `\"bool\"`).",
            },
        );

        signatures.insert(
            "toString",
            BuiltinSignature {
                signatures: vec!["toString(value) -> string"],
                documentation: "Converts `value` to its string representation.",
            },
        );

        signatures.insert(
            "parseNumber",
            BuiltinSignature {
                signatures: vec!["parseNumber(text) -> number?"],
                documentation: "Parses `text` as a number, or returns nil if it is not numeric.",
            },
        );

        signatures.insert(
            "arrayPush",
            BuiltinSignature {
                signatures: vec!["arrayPush(array, value) -> array"],
                documentation: "Appends `value` to the end of `array` and returns the array.",
            },
        );

        signatures.insert(
            "arrayPop",
            BuiltinSignature {
                signatures: vec!["arrayPop(array) -> value?"],
                documentation: "Removes and returns the last element of `array`, or nil if it is empty.",
            },
        );

        signatures.insert(
            "arrayLen",
            BuiltinSignature {
                signatures: vec!["arrayLen(array) -> number"],
                documentation: "Returns the number of elements in `array`.",
            },
        );

        signatures.insert(
            "keys",
            BuiltinSignature {
                signatures: vec!["keys(table) -> array<string>"],
                documentation: "Returns the keys of `table` in insertion order.",
            },
        );

        signatures.insert(
            "values",
            BuiltinSignature {
                signatures: vec!["values(table) -> array"],
                documentation: "Returns the values of `table` in insertion order.",
            },
        );

        signatures.insert(
            "range",
            BuiltinSignature {
                signatures: vec!["range(start, end) -> array<number>", "range(end) -> array<number>"],
                documentation: "Returns an array of consecutive integers from `start` (default 0) up to, but excluding, `end`.",
            },
        );

        signatures.insert(
            "assert",
            BuiltinSignature {
                signatures: vec!["assert(condition, message)", "assert(condition)"],
                documentation: "Raises a runtime error with `message` when `condition` is falsy.",
            },
        );

        signatures
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_push_signature_mentions_array() {
        let table = builtin_signatures();
        let entry = table.get("arrayPush").expect("arrayPush is a built-in");
        assert!(entry.signatures[0].contains("arrayPush(array"));
        assert!(entry.documentation.contains("array"));
    }

    #[test]
    fn lookup_is_cached_across_calls() {
        let a = builtin_signatures() as *const _;
        let b = builtin_signatures() as *const _;
        assert_eq!(a, b);
    }
}
