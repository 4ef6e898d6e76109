//! Compiler diagnostics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Codes reported when a type or namespace cannot be resolved, usually
/// because an assembly reference is missing.
pub const MISSING_REFERENCE_CODES: [&str; 3] = [
    "CS0012", // type is defined in an assembly that is not referenced
    "CS0246", // type or namespace name could not be found
    "CS0234", // type or namespace name does not exist in the namespace
];

/// Diagnostic severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hidden,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Hidden => write!(f, "hidden"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One compiler-reported issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Compiler code, e.g. `CS0246`
    pub code: String,

    /// Human readable message
    pub message: String,

    /// Reported severity
    pub severity: Severity,

    /// 1-based source line
    pub line: usize,

    /// Warning promoted to an error by the compilation options
    #[serde(default)]
    pub warning_as_error: bool,
}

impl Diagnostic {
    pub fn new(code: &str, message: impl Into<String>, severity: Severity, line: usize) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity,
            line,
            warning_as_error: false,
        }
    }

    pub fn error(code: &str, message: impl Into<String>, line: usize) -> Self {
        Self::new(code, message, Severity::Error, line)
    }

    pub fn warning(code: &str, message: impl Into<String>, line: usize) -> Self {
        Self::new(code, message, Severity::Warning, line)
    }

    /// Errors and promoted warnings fail a compilation
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Error || self.warning_as_error
    }

    /// Whether the code signals an unresolved type or namespace
    #[must_use]
    pub fn is_missing_reference(&self) -> bool {
        MISSING_REFERENCE_CODES.contains(&self.code.as_str())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} (line {})", self.code, self.message, self.line)
    }
}

#[cfg(test)]
#[path = "diagnostic/diagnostic_tests.rs"]
mod diagnostic_tests;
