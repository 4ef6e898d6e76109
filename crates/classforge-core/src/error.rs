//! Error types for classforge operations

use crate::Diagnostic;
use thiserror::Error;

/// Result type alias for classforge operations
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Error type for generation and compilation
#[derive(Error, Debug)]
pub enum ForgeError {
    /// Empty or malformed JSON, source text, or output path
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required external runtime installation is missing
    #[error("environment error: {0}")]
    Environment(String),

    /// Source failed to compile; `report` is the formatted, user-facing text
    #[error("{report}")]
    Compilation {
        diagnostics: Vec<Diagnostic>,
        report: String,
    },

    /// A reference metadata file could not be read or parsed
    #[error("invalid reference {path}: {message}")]
    Reference { path: String, message: String },

    /// Compiled module is unreadable or inconsistent
    #[error("module error: {0}")]
    Module(String),

    /// I/O error while writing or reading files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ForgeError {
    /// Returns a stable numeric code for the error category
    pub fn error_code(&self) -> u32 {
        match self {
            ForgeError::InvalidInput(_) => 1,
            ForgeError::Environment(_) => 2,
            ForgeError::Compilation { .. } => 3,
            ForgeError::Reference { .. } => 4,
            ForgeError::Module(_) => 5,
            ForgeError::Io(_) => 6,
        }
    }

    /// Diagnostics carried by a compilation failure, empty otherwise
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            ForgeError::Compilation { diagnostics, .. } => diagnostics,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for ForgeError {
    fn from(err: serde_json::Error) -> Self {
        ForgeError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
