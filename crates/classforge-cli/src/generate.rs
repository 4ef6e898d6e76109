//! Generate command implementation

use crate::settings::SettingsArgs;
use anyhow::{Context, Result};
use classforge_codegen::generate_source;
use std::fs;
use std::path::Path;

/// Run the generate command
pub fn run(input: &Path, output: Option<&Path>, args: &SettingsArgs) -> Result<()> {
    let settings = args.resolve()?;
    let json = fs::read_to_string(input)
        .with_context(|| format!("Failed to read JSON sample: {}", input.display()))?;

    let source = generate_source(&json, &settings)
        .with_context(|| format!("Failed to generate classes from {}", input.display()))?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(path, &source)
                .with_context(|| format!("Failed to write source: {}", path.display()))?;
            eprintln!("✓ Generated {}", path.display());
        }
        None => print!("{source}"),
    }

    Ok(())
}
