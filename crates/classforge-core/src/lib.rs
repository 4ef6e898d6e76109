//! classforge-core - Settings, errors, and diagnostics shared by the pipelines
//!
//! This crate provides the types both classforge pipelines agree on:
//! - [`GenerationSettings`] for generation and compilation calls
//! - [`TargetRuntime`] and [`JsonLibrary`] selectors
//! - [`ForgeError`] for error handling
//! - [`Diagnostic`] records produced by the compiler front end
//! - [`format_diagnostics`] for user-facing remediation text
//! - [`is_keyword`] for the reserved words of the generated language
//! - [`is_identifier_start`] and [`is_identifier_part`] for its identifier alphabet

mod diagnostic;
mod error;
mod identifier;
mod keywords;
mod report;
mod settings;

pub use diagnostic::{Diagnostic, Severity, MISSING_REFERENCE_CODES};
pub use error::{ForgeError, ForgeResult};
pub use identifier::{is_identifier_part, is_identifier_start};
pub use keywords::{CSHARP_KEYWORDS, is_keyword};
pub use report::{format_diagnostics, DiagnosticsReport};
pub use settings::{GenerationSettings, JsonLibrary, TargetRuntime};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Diagnostic, ForgeError, ForgeResult, GenerationSettings, JsonLibrary, Severity,
        TargetRuntime,
    };
}
