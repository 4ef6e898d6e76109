//! Manifest schema for compiled modules.

use super::{METADATA_FILE, MODULE_VERSION, ModuleError, ModuleResult};
use crate::options::CompilationOptions;
use classforge_core::{JsonLibrary, TargetRuntime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Module manifest, stored as `manifest.json` at the archive root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// Module format version (e.g., "1.0").
    pub module_version: String,

    pub assembly: AssemblyInfo,

    pub target_framework: TargetRuntime,

    pub json_library: JsonLibrary,

    /// Options the module was compiled with.
    pub options: CompilationOptions,

    /// Tool that produced the module.
    pub generator: String,

    /// Libraries the module was bound against, in manifest order.
    #[serde(default)]
    pub references: Vec<ReferenceInfo>,

    /// Archive entries other than the manifest, keyed by path.
    #[serde(default)]
    pub files: IndexMap<String, FileInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceInfo {
    pub name: String,
    pub version: String,
    /// Metadata path, `builtin:` for embedded references
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// `sha256:<hex>`
    pub checksum: String,
}

impl ModuleManifest {
    pub fn new(
        assembly_name: &str,
        assembly_version: &str,
        target_framework: TargetRuntime,
        json_library: JsonLibrary,
        options: CompilationOptions,
    ) -> Self {
        Self {
            module_version: MODULE_VERSION.to_string(),
            assembly: AssemblyInfo {
                name: assembly_name.to_string(),
                version: assembly_version.to_string(),
            },
            target_framework,
            json_library,
            options,
            generator: concat!("classforge ", env!("CARGO_PKG_VERSION")).to_string(),
            references: Vec::new(),
            files: IndexMap::new(),
        }
    }

    pub fn add_reference(&mut self, name: &str, version: &str, source: &str) {
        self.references.push(ReferenceInfo {
            name: name.to_string(),
            version: version.to_string(),
            source: source.to_string(),
        });
    }

    pub fn add_file(&mut self, path: &str, checksum: &str) {
        self.files.insert(
            path.to_string(),
            FileInfo {
                checksum: format!("sha256:{checksum}"),
            },
        );
    }

    /// Check required fields.
    pub fn validate(&self) -> ModuleResult<()> {
        if self.module_version.is_empty() {
            return Err(ModuleError::InvalidManifest(
                "module_version is required".to_string(),
            ));
        }

        if self.module_version.split('.').next() != MODULE_VERSION.split('.').next() {
            return Err(ModuleError::InvalidManifest(format!(
                "unsupported module_version {}",
                self.module_version
            )));
        }

        if self.assembly.name.is_empty() {
            return Err(ModuleError::InvalidManifest(
                "assembly.name is required".to_string(),
            ));
        }

        if self.assembly.version.is_empty() {
            return Err(ModuleError::InvalidManifest(
                "assembly.version is required".to_string(),
            ));
        }

        if !self.files.contains_key(METADATA_FILE) {
            return Err(ModuleError::InvalidManifest(format!(
                "{METADATA_FILE} must be listed in files"
            )));
        }

        for (path, info) in &self.files {
            if !info.checksum.starts_with("sha256:") {
                return Err(ModuleError::InvalidManifest(format!(
                    "file {path}: checksum must be sha256"
                )));
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> ModuleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ModuleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
