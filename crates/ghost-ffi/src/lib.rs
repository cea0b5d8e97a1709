//! FFI definition store (spec.md §4.3).
//!
//! Loads one JSON catalog of extension-language functions and globals,
//! embedded in the binary at compile time via [`include_str!`], and answers
//! lookups for hover, completion, and signature help. A malformed catalog is
//! a startup-time bug, not a runtime condition, so [`FfiStore::load`] is the
//! only place this crate's error type is produced.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod builtins;

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

const CATALOG_JSON: &str = include_str!("catalog.json");

/// File extensions recognized as shell-dialect source (spec.md §4.3 `is_shell_file`).
const SHELL_EXTENSIONS: &[&str] = &["gsh", "gshrc"];

/// Failure loading the embedded FFI catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The embedded JSON failed to parse or did not match the expected shape.
    #[error("malformed FFI catalog: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One parameter of an [`FfiFunction`].
#[derive(Debug, Clone, Deserialize)]
pub struct FfiParameter {
    /// Parameter name as it appears in the signature.
    pub name: String,
    /// Parameter type, as a documentation string (not type-checked).
    #[serde(rename = "type")]
    pub ty: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// The return value documentation of an [`FfiFunction`].
#[derive(Debug, Clone, Deserialize)]
pub struct FfiReturn {
    /// Return type, as a documentation string.
    #[serde(rename = "type")]
    pub ty: String,
    /// Human-readable description, if the catalog provides one.
    #[serde(default)]
    pub description: Option<String>,
}

/// A function exposed by an FFI namespace (spec.md §4.3 `FFIFunction`).
#[derive(Debug, Clone, Deserialize)]
pub struct FfiFunction {
    /// Bare function name (without namespace prefix).
    pub name: String,
    /// Full call signature, as shown in hover/signature-help.
    pub signature: String,
    /// Prose description of the function's behavior.
    pub description: String,
    /// Parameter documentation, in call order.
    #[serde(default)]
    pub parameters: Vec<FfiParameter>,
    /// Return value documentation.
    #[serde(rename = "return")]
    pub returns: FfiReturn,
    /// Short usage examples, rendered verbatim in hover Markdown.
    #[serde(default)]
    pub examples: Vec<String>,
}

/// A global value exposed by an FFI namespace (spec.md §4.3 `FFIGlobal`).
#[derive(Debug, Clone, Deserialize)]
pub struct FfiGlobal {
    /// Global variable name (without namespace prefix).
    pub name: String,
    /// Documentation type string.
    #[serde(rename = "type")]
    pub ty: String,
    /// Prose description.
    pub description: String,
    /// Whether the global is read-only from Ghost source.
    pub readonly: bool,
}

#[derive(Debug, Deserialize)]
struct FfiNamespaceRaw {
    #[serde(default)]
    functions: HashMap<String, FfiFunction>,
    #[serde(default)]
    globals: HashMap<String, FfiGlobal>,
}

/// A named group of FFI functions and globals, e.g. `shell` or `git`.
#[derive(Debug)]
pub struct FfiNamespace {
    functions: HashMap<String, FfiFunction>,
    globals: HashMap<String, FfiGlobal>,
}

impl FfiNamespace {
    /// Look up a function by name within this namespace.
    pub fn get_function(&self, name: &str) -> Option<&FfiFunction> {
        self.functions.get(name)
    }

    /// Look up a global by name within this namespace.
    pub fn get_global(&self, name: &str) -> Option<&FfiGlobal> {
        self.globals.get(name)
    }

    /// Iterate over every function in this namespace (completion enumeration).
    pub fn functions(&self) -> impl Iterator<Item = &FfiFunction> {
        self.functions.values()
    }

    /// Iterate over every global in this namespace.
    pub fn globals(&self) -> impl Iterator<Item = &FfiGlobal> {
        self.globals.values()
    }
}

/// The loaded FFI catalog: one [`FfiNamespace`] per extension-language module.
pub struct FfiStore {
    namespaces: HashMap<String, FfiNamespace>,
}

impl FfiStore {
    /// Parse `json` into an `FfiStore`. Exposed separately from [`FfiStore::load`]
    /// so tests can exercise alternate catalogs without touching the embedded one.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, FfiNamespaceRaw> = serde_json::from_str(json)?;
        let namespaces = raw
            .into_iter()
            .map(|(name, ns)| (name, FfiNamespace { functions: ns.functions, globals: ns.globals }))
            .collect();
        Ok(Self { namespaces })
    }

    /// Look up a function in `namespace`.
    pub fn get_function(&self, namespace: &str, name: &str) -> Option<&FfiFunction> {
        self.namespaces.get(namespace)?.get_function(name)
    }

    /// Look up a global in `namespace`.
    pub fn get_global(&self, namespace: &str, name: &str) -> Option<&FfiGlobal> {
        self.namespaces.get(namespace)?.get_global(name)
    }

    /// Iterate over every function in `namespace`. Empty iterator for an unknown namespace.
    pub fn functions(&self, namespace: &str) -> Box<dyn Iterator<Item = &FfiFunction> + '_> {
        match self.namespaces.get(namespace) {
            Some(ns) => Box::new(ns.functions()),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Iterate over every global in `namespace`. Empty iterator for an unknown namespace.
    pub fn globals(&self, namespace: &str) -> Box<dyn Iterator<Item = &FfiGlobal> + '_> {
        match self.namespaces.get(namespace) {
            Some(ns) => Box::new(ns.globals()),
            None => Box::new(std::iter::empty()),
        }
    }

    /// The full set of namespace names (e.g. `"shell"`, `"git"`, `"fs"`, `"http"`).
    pub fn namespace_names(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    /// Whether `extension` (without the leading dot) names a shell-dialect file.
    pub fn is_shell_file(extension: &str) -> bool {
        SHELL_EXTENSIONS.contains(&extension)
    }
}

static CATALOG: OnceLock<FfiStore> = OnceLock::new();

/// The process-wide FFI catalog, parsed from the embedded JSON on first use.
///
/// Spec.md §4.3 treats a malformed catalog as fatal at startup; since the
/// catalog is embedded at compile time rather than read from disk, a parse
/// failure here indicates a build-time defect, so this panics rather than
/// threading a `Result` through every caller.
pub fn catalog() -> &'static FfiStore {
    CATALOG.get_or_init(|| {
        FfiStore::from_json(CATALOG_JSON).unwrap_or_else(|e| {
            unreachable!("embedded FFI catalog must be well-formed: {e}")
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_embedded_catalog() {
        let store = catalog();
        let names: Vec<_> = store.namespace_names().collect();
        assert!(names.contains(&"shell"));
        assert!(names.contains(&"git"));
        assert!(names.contains(&"fs"));
        assert!(names.contains(&"http"));
    }

    #[test]
    fn shell_exec_is_documented() {
        let store = catalog();
        let f = store.get_function("shell", "exec").expect("shell.exec is documented");
        assert!(f.signature.contains("exec"));
        assert!(!f.examples.is_empty());
    }

    #[test]
    fn shell_alias_global_is_present() {
        let store = catalog();
        let g = store.get_global("shell", "alias").expect("shell.alias is documented");
        assert_eq!(g.ty, "table<string, string>");
    }

    #[test]
    fn unknown_namespace_yields_empty_function_iterator() {
        let store = catalog();
        assert_eq!(store.functions("nonexistent").count(), 0);
    }

    #[test]
    fn shell_extensions_are_recognized() {
        assert!(FfiStore::is_shell_file("gsh"));
        assert!(FfiStore::is_shell_file("gshrc"));
        assert!(!FfiStore::is_shell_file("ghost"));
    }

    #[test]
    fn malformed_catalog_is_reported_not_panicked() {
        assert!(FfiStore::from_json("not json").is_err());
    }
}
