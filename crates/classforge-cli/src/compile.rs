//! Compile command implementation

use crate::settings::SettingsArgs;
use anyhow::{Context, Result};
use classforge_compiler::{CompilerBackend, CompilerConfig, ReferenceCatalog};
use classforge_core::ForgeError;
use std::fs;
use std::path::{Path, PathBuf};

/// Run the compile command. Returns `false` when the source has errors.
pub fn run(source: &Path, output: &Path, references: &[PathBuf], args: &SettingsArgs) -> Result<bool> {
    let settings = args.resolve()?;
    let code = read_source(source)?;
    let backend = backend(references)?;

    match backend.compile(&code, output, &settings) {
        Ok(path) => {
            println!("✓ Module written: {}", path.display());
            println!("  Assembly: {}", settings.namespace);
            println!("  Target:   {}", settings.target_runtime.display_name());
            println!("  JSON:     {}", settings.json_library);
            Ok(true)
        }
        Err(ForgeError::Compilation { report, .. }) => {
            eprintln!("{report}");
            Ok(false)
        }
        Err(err) => Err(err).with_context(|| format!("Failed to compile {}", source.display())),
    }
}

pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read source: {}", path.display()))
}

/// Backend with the built-in catalog plus `references`.
pub fn backend(references: &[PathBuf]) -> Result<CompilerBackend> {
    let mut catalog = ReferenceCatalog::builtin();
    for path in references {
        let name = catalog
            .register_file(path)
            .with_context(|| format!("Failed to register reference: {}", path.display()))?;
        tracing::info!(assembly = %name, "registered reference");
    }
    Ok(CompilerBackend::new(CompilerConfig::default().with_catalog(catalog)))
}
