//! Stable diagnostic codes and severity levels for ghost-lsp.
//!
//! This crate provides the canonical definitions of diagnostic codes used
//! throughout the Ghost LSP ecosystem. These codes are stable and can be
//! referenced in documentation and error messages.
//!
//! # Code Ranges
//!
//! | Range       | Category                        |
//! |-------------|----------------------------------|
//! | GH001-GH099 | Parser diagnostics               |
//! | GC001-GC005 | Smart-contract lint passes       |
//!
//! # Example
//!
//! ```
//! use ghost_diagnostics_codes::{DiagnosticCode, DiagnosticSeverity};
//!
//! let code = DiagnosticCode::SyntaxError;
//! assert_eq!(code.as_str(), "GH001");
//! assert_eq!(code.severity(), DiagnosticSeverity::Error);
//! ```

use std::fmt;

/// Severity level of a diagnostic.
///
/// Maps to LSP DiagnosticSeverity values (1=Error, 2=Warning, 3=Info, 4=Hint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DiagnosticSeverity {
    /// A parser `ERROR`/`MISSING` node, or an unrecoverable analysis failure.
    Error = 1,
    /// Non-critical issue that should be addressed.
    Warning = 2,
    /// Informational message.
    Information = 3,
    /// Subtle suggestion or hint.
    Hint = 4,
}

impl DiagnosticSeverity {
    /// Get the LSP numeric value for this severity.
    pub fn to_lsp_value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

/// Diagnostic tags for additional classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticTag {
    /// Code that can be safely removed.
    Unnecessary,
    /// Code using deprecated features.
    Deprecated,
}

impl DiagnosticTag {
    /// Get the LSP numeric value for this tag.
    pub fn to_lsp_value(self) -> u8 {
        match self {
            DiagnosticTag::Unnecessary => 1,
            DiagnosticTag::Deprecated => 2,
        }
    }
}

/// Stable diagnostic codes for ghost-lsp.
///
/// Each code has a fixed string representation and associated metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticCode {
    // Parser diagnostics (GH001-GH099), spec.md §4.7.1.
    /// A tree-sitter `ERROR` node.
    SyntaxError,
    /// A tree-sitter `MISSING` node.
    MissingNode,
    /// The parser reached end-of-input mid-construct.
    UnexpectedEof,

    // Smart-contract lint passes (GC001-GC005), spec.md §4.7.1.
    /// External call followed by a state change in the same function.
    ReentrancyRisk,
    /// Storage read of the same subscript three or more times.
    RedundantStorageRead,
    /// State-mutating top-level function with no caller/role check.
    MissingAccessControl,
    /// Unchecked arithmetic in an assignment with no neighbouring guard.
    UncheckedArithmetic,
    /// Block timestamp used in a comparison.
    TimestampDependence,
}

impl DiagnosticCode {
    /// Get the string representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::SyntaxError => "GH001",
            DiagnosticCode::MissingNode => "GH002",
            DiagnosticCode::UnexpectedEof => "GH003",
            DiagnosticCode::ReentrancyRisk => "GC001",
            DiagnosticCode::RedundantStorageRead => "GC002",
            DiagnosticCode::MissingAccessControl => "GC003",
            DiagnosticCode::UncheckedArithmetic => "GC004",
            DiagnosticCode::TimestampDependence => "GC005",
        }
    }

    /// Get the default severity for this diagnostic code.
    pub fn severity(&self) -> DiagnosticSeverity {
        match self {
            DiagnosticCode::SyntaxError
            | DiagnosticCode::MissingNode
            | DiagnosticCode::UnexpectedEof => DiagnosticSeverity::Error,

            DiagnosticCode::ReentrancyRisk
            | DiagnosticCode::MissingAccessControl
            | DiagnosticCode::UncheckedArithmetic
            | DiagnosticCode::TimestampDependence => DiagnosticSeverity::Warning,

            DiagnosticCode::RedundantStorageRead => DiagnosticSeverity::Hint,
        }
    }

    /// Get any diagnostic tags associated with this code.
    pub fn tags(&self) -> &'static [DiagnosticTag] {
        &[]
    }

    /// Try to parse a code string into a `DiagnosticCode`.
    pub fn parse_code(code: &str) -> Option<DiagnosticCode> {
        match code {
            "GH001" => Some(DiagnosticCode::SyntaxError),
            "GH002" => Some(DiagnosticCode::MissingNode),
            "GH003" => Some(DiagnosticCode::UnexpectedEof),
            "GC001" => Some(DiagnosticCode::ReentrancyRisk),
            "GC002" => Some(DiagnosticCode::RedundantStorageRead),
            "GC003" => Some(DiagnosticCode::MissingAccessControl),
            "GC004" => Some(DiagnosticCode::UncheckedArithmetic),
            "GC005" => Some(DiagnosticCode::TimestampDependence),
            _ => None,
        }
    }

    /// Get the category of this diagnostic code.
    pub fn category(&self) -> DiagnosticCategory {
        match self {
            DiagnosticCode::SyntaxError
            | DiagnosticCode::MissingNode
            | DiagnosticCode::UnexpectedEof => DiagnosticCategory::Parser,

            DiagnosticCode::ReentrancyRisk
            | DiagnosticCode::RedundantStorageRead
            | DiagnosticCode::MissingAccessControl
            | DiagnosticCode::UncheckedArithmetic
            | DiagnosticCode::TimestampDependence => DiagnosticCategory::ContractLint,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticCategory {
    /// Parser-related diagnostics (GH001-GH099).
    Parser,
    /// Smart-contract lint passes (GC001-GC005).
    ContractLint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_strings() {
        assert_eq!(DiagnosticCode::SyntaxError.as_str(), "GH001");
        assert_eq!(DiagnosticCode::ReentrancyRisk.as_str(), "GC001");
    }

    #[test]
    fn severity_matches_spec() {
        assert_eq!(DiagnosticCode::SyntaxError.severity(), DiagnosticSeverity::Error);
        assert_eq!(DiagnosticCode::ReentrancyRisk.severity(), DiagnosticSeverity::Warning);
        assert_eq!(DiagnosticCode::RedundantStorageRead.severity(), DiagnosticSeverity::Hint);
    }

    #[test]
    fn parse_code_round_trips() {
        assert_eq!(DiagnosticCode::parse_code("GH001"), Some(DiagnosticCode::SyntaxError));
        assert_eq!(DiagnosticCode::parse_code("INVALID"), None);
    }

    #[test]
    fn category_matches_code_range() {
        assert_eq!(DiagnosticCode::SyntaxError.category(), DiagnosticCategory::Parser);
        assert_eq!(DiagnosticCode::ReentrancyRisk.category(), DiagnosticCategory::ContractLint);
    }
}
