//! Diagnostics formatting for end users
//!
//! Compilation failures are shown to people who generated their classes from
//! a JSON sample and may never have seen a compiler error. Missing-reference
//! diagnostics (see [`MISSING_REFERENCE_CODES`](crate::MISSING_REFERENCE_CODES))
//! usually mean the selected runtime lacks a library, so the report leads with
//! a remediation paragraph before listing every diagnostic.

use crate::{Diagnostic, TargetRuntime};
use std::fmt::Write;

const NETFX_DOWNLOAD_URL: &str = "https://dotnet.microsoft.com/download/dotnet-framework";

/// Diagnostics split by classification, plus the rendered text.
#[derive(Debug, Clone)]
pub struct DiagnosticsReport {
    /// Diagnostics whose codes signal an unresolved type or namespace
    pub missing_references: Vec<Diagnostic>,

    /// Every other diagnostic
    pub other: Vec<Diagnostic>,

    /// Text surfaced to the user
    pub text: String,
}

impl DiagnosticsReport {
    /// Classify and render diagnostics for the given runtime.
    pub fn build(diagnostics: &[Diagnostic], runtime: TargetRuntime) -> Self {
        let (missing_references, other): (Vec<_>, Vec<_>) = diagnostics
            .iter()
            .cloned()
            .partition(Diagnostic::is_missing_reference);

        let mut text = String::from("Compilation errors:");

        if !missing_references.is_empty() {
            text.push_str("\n\n");
            text.push_str(&remediation(runtime));
        }

        for diagnostic in diagnostics {
            let _ = write!(
                text,
                "\n\n{}: {} (line {})",
                diagnostic.code, diagnostic.message, diagnostic.line
            );
        }

        Self {
            missing_references,
            other,
            text,
        }
    }

    #[must_use]
    pub fn has_missing_references(&self) -> bool {
        !self.missing_references.is_empty()
    }
}

/// Render diagnostics into the text shown to the user.
pub fn format_diagnostics(diagnostics: &[Diagnostic], runtime: TargetRuntime) -> String {
    DiagnosticsReport::build(diagnostics, runtime).text
}

fn remediation(runtime: TargetRuntime) -> String {
    let mut text =
        String::from("Some required components may not be installed on this machine.\n");
    if runtime.requires_system_install() {
        let _ = writeln!(
            text,
            "Compiling for {} requires that framework version to be installed.",
            runtime.display_name()
        );
        let _ = write!(
            text,
            "Please install {} from {NETFX_DOWNLOAD_URL}",
            runtime.display_name()
        );
    } else {
        let _ = write!(
            text,
            "Compiling for {} may require additional libraries.",
            runtime.moniker()
        );
    }
    text
}
