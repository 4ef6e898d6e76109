//! Module creation.

use super::{MANIFEST_FILE, METADATA_FILE, ModuleManifest, ModuleResult, SOURCE_DIR};
use crate::metadata::TypeTable;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builder for module archives.
///
/// # Example
///
/// ```no_run
/// use classforge_compiler::metadata::TypeTable;
/// use classforge_compiler::module::{ModuleManifest, ModuleWriter, ASSEMBLY_VERSION};
/// use classforge_compiler::CompilationOptions;
/// use classforge_core::{JsonLibrary, TargetRuntime};
///
/// let manifest = ModuleManifest::new(
///     "RpaJsonModels",
///     ASSEMBLY_VERSION,
///     TargetRuntime::NetStandard21,
///     JsonLibrary::SystemTextJson,
///     CompilationOptions::for_optimize(true, false),
/// );
/// ModuleWriter::new(manifest)
///     .add_metadata(&TypeTable::default())?
///     .write("out/RpaJsonModels.dll")?;
/// # Ok::<(), classforge_compiler::module::ModuleError>(())
/// ```
pub struct ModuleWriter {
    manifest: ModuleManifest,
    files: Vec<ModuleFile>,
}

struct ModuleFile {
    archive_path: String,
    contents: Vec<u8>,
}

impl ModuleWriter {
    #[must_use]
    pub fn new(manifest: ModuleManifest) -> Self {
        Self {
            manifest,
            files: Vec::new(),
        }
    }

    /// Add the type table as `metadata.json`.
    pub fn add_metadata(self, types: &TypeTable) -> ModuleResult<Self> {
        let json = serde_json::to_string_pretty(types)?;
        Ok(self.add_bytes(METADATA_FILE, json.into_bytes()))
    }

    /// Embed a source file under `source/`.
    #[must_use]
    pub fn add_source(self, file_name: &str, source: &str) -> Self {
        let archive_path = format!("{SOURCE_DIR}/{file_name}");
        self.add_bytes(&archive_path, source.as_bytes().to_vec())
    }

    /// Add raw bytes, recording their checksum in the manifest.
    #[must_use]
    pub fn add_bytes(mut self, archive_path: &str, contents: Vec<u8>) -> Self {
        let checksum = compute_sha256(&contents);
        self.manifest.add_file(archive_path, &checksum);
        self.files.push(ModuleFile {
            archive_path: archive_path.to_string(),
            contents,
        });
        self
    }

    /// Build the archive in memory.
    pub fn to_bytes(&self) -> ModuleResult<Vec<u8>> {
        self.manifest.validate()?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default())
            .unix_permissions(0o644);

        let manifest_json = self.manifest.to_json()?;
        zip.start_file(MANIFEST_FILE, options)?;
        zip.write_all(manifest_json.as_bytes())?;

        for file in &self.files {
            zip.start_file(file.archive_path.as_str(), options)?;
            zip.write_all(&file.contents)?;
        }

        Ok(zip.finish()?.into_inner())
    }

    /// Build the archive and write it, replacing any existing file.
    ///
    /// Nothing is written if the archive cannot be built.
    pub fn write<P: AsRef<Path>>(self, output_path: P) -> ModuleResult<()> {
        let output_path = output_path.as_ref();
        let bytes = self.to_bytes()?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, bytes)?;

        Ok(())
    }

    #[must_use]
    pub fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }
}

/// SHA256 of `data` as lowercase hex.
pub fn compute_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Verify a checksum given as `sha256:<hex>` or bare hex.
pub fn verify_sha256(data: &[u8], expected: &str) -> bool {
    let expected_hex = expected.strip_prefix("sha256:").unwrap_or(expected);
    compute_sha256(data) == expected_hex
}
