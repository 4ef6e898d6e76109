//! Check command implementation

use crate::compile::{backend, read_source};
use crate::settings::SettingsArgs;
use anyhow::{Context, Result};
use classforge_core::format_diagnostics;
use std::path::{Path, PathBuf};

/// Run the check command. Returns `false` when the source has errors.
pub fn run(source: &Path, references: &[PathBuf], args: &SettingsArgs) -> Result<bool> {
    let settings = args.resolve()?;
    let code = read_source(source)?;

    let failures = backend(references)?
        .validate(&code, &settings)
        .with_context(|| format!("Failed to check {}", source.display()))?;

    if failures.is_empty() {
        println!(
            "✓ {} compiles for {}",
            source.display(),
            settings.target_runtime.display_name()
        );
        return Ok(true);
    }

    eprintln!("{}", format_diagnostics(&failures, settings.target_runtime));
    Ok(false)
}
