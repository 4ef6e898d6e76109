//! Reference assembly metadata
//!
//! A reference describes what a library exports: its assembly name and
//! version, and for each namespace the type names it declares. Generic
//! types carry their arity as a `` `N `` suffix (`List`1`). The built-in
//! catalog is embedded in the crate; more files can be registered at
//! runtime and are then part of every dependency manifest.

use classforge_core::{
    ForgeError, ForgeResult, TargetRuntime, is_identifier_part, is_identifier_start,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Libraries every compilation references.
pub const BASE_LIBRARIES: [&str; 6] = [
    "System.Runtime",
    "System.Collections",
    "System.Linq",
    "System.ObjectModel",
    "System.Runtime.Serialization.Primitives",
    "System.ComponentModel.Primitives",
];

macro_rules! builtin {
    ($file:literal) => {
        ReferenceSource::Builtin {
            path: concat!("builtin:refs/", $file),
            text: include_str!(concat!("../refs/", $file)),
        }
    };
}

fn builtin_libraries() -> Vec<ReferenceSource> {
    vec![
        builtin!("System.Runtime.toml"),
        builtin!("System.Collections.toml"),
        builtin!("System.Linq.toml"),
        builtin!("System.ObjectModel.toml"),
        builtin!("System.Runtime.Serialization.Primitives.toml"),
        builtin!("System.ComponentModel.Primitives.toml"),
        builtin!("Newtonsoft.Json.toml"),
        builtin!("System.Text.Json.toml"),
    ]
}

fn builtin_runtime_libraries(runtime: TargetRuntime) -> Vec<ReferenceSource> {
    let mut sources = Vec::new();
    match runtime {
        TargetRuntime::NetStandard20 => sources.push(builtin!("netstandard2.0/netstandard.toml")),
        TargetRuntime::NetStandard21 => sources.push(builtin!("netstandard2.1/netstandard.toml")),
        TargetRuntime::NetFramework48 => {
            sources.push(builtin!("net48/mscorlib.toml"));
            sources.push(builtin!("net48/System.Numerics.toml"));
            sources.push(builtin!("net48/System.Xml.toml"));
        }
        TargetRuntime::Net60 | TargetRuntime::Net70 | TargetRuntime::Net80 | TargetRuntime::Net90 => {
            sources.push(builtin!("net6.0/System.Private.CoreLib.toml"));
            if matches!(runtime, TargetRuntime::Net70 | TargetRuntime::Net80 | TargetRuntime::Net90) {
                sources.push(builtin!("net7.0/System.Private.CoreLib.toml"));
            }
            if matches!(runtime, TargetRuntime::Net80 | TargetRuntime::Net90) {
                sources.push(builtin!("net8.0/System.Collections.Immutable.toml"));
            }
            if runtime == TargetRuntime::Net90 {
                sources.push(builtin!("net9.0/System.Private.CoreLib.toml"));
            }
        }
    }
    sources
}

/// Exported types of one namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceNamespace {
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Parsed reference metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceAssembly {
    pub name: String,
    pub version: String,
    #[serde(default, rename = "namespace")]
    pub namespaces: Vec<ReferenceNamespace>,

    /// Where the metadata was loaded from
    #[serde(skip)]
    pub source: String,
}

/// A type exported by a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportedType<'a> {
    pub namespace: &'a str,
    pub name: &'a str,
    pub arity: usize,
}

impl ReferenceAssembly {
    /// Parse and validate reference metadata; `path` is used in errors.
    pub fn parse(path: &str, text: &str) -> ForgeResult<Self> {
        let mut reference: ReferenceAssembly =
            toml::from_str(text).map_err(|e| invalid(path, e.to_string()))?;
        reference.validate(path)?;
        reference.source = path.to_string();
        Ok(reference)
    }

    fn validate(&self, path: &str) -> ForgeResult<()> {
        if !is_dotted_name(&self.name) {
            return Err(invalid(path, format!("invalid assembly name '{}'", self.name)));
        }
        if self.version.trim().is_empty() {
            return Err(invalid(path, "version is required"));
        }
        for namespace in &self.namespaces {
            if !is_dotted_name(&namespace.name) {
                return Err(invalid(path, format!("invalid namespace '{}'", namespace.name)));
            }
            for raw in &namespace.types {
                let (name, _) = split_arity(raw);
                if !is_simple_name(name) || (raw.contains('`') && split_arity(raw).1 == 0) {
                    return Err(invalid(
                        path,
                        format!("invalid type '{raw}' in namespace '{}'", namespace.name),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Every exported type, with arity split from the name.
    pub fn exported_types(&self) -> impl Iterator<Item = ExportedType<'_>> {
        self.namespaces.iter().flat_map(|ns| {
            ns.types.iter().map(move |raw| {
                let (name, arity) = split_arity(raw);
                ExportedType {
                    namespace: &ns.name,
                    name,
                    arity,
                }
            })
        })
    }

    pub fn type_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.types.len()).sum()
    }
}

/// Split `List`1` into `("List", 1)`. Names without a suffix have arity 0.
pub fn split_arity(raw: &str) -> (&str, usize) {
    match raw.split_once('`') {
        Some((name, arity)) => (name, arity.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

fn is_simple_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_part)
}

fn is_dotted_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_simple_name)
}

fn invalid(path: &str, message: impl Into<String>) -> ForgeError {
    ForgeError::Reference {
        path: path.to_string(),
        message: message.into(),
    }
}

/// Where a reference's metadata comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSource {
    /// Embedded in the crate
    Builtin {
        path: &'static str,
        text: &'static str,
    },
    /// A file on disk
    File(PathBuf),
}

impl ReferenceSource {
    /// Key identifying the source in caches and manifests.
    pub fn path(&self) -> String {
        match self {
            ReferenceSource::Builtin { path, .. } => (*path).to_string(),
            ReferenceSource::File(path) => path.display().to_string(),
        }
    }

    /// Read and parse the metadata.
    pub fn load(&self) -> ForgeResult<ReferenceAssembly> {
        match self {
            ReferenceSource::Builtin { path, text } => ReferenceAssembly::parse(path, text),
            ReferenceSource::File(path) => {
                let display = path.display().to_string();
                let text = std::fs::read_to_string(path)
                    .map_err(|e| invalid(&display, format!("cannot read file: {e}")))?;
                ReferenceAssembly::parse(&display, &text)
            }
        }
    }
}

/// Known libraries by assembly name, plus runtime-specific libraries and
/// user-registered extras.
#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    libraries: IndexMap<String, ReferenceSource>,
    extras: Vec<String>,
    include_runtime_libraries: bool,
}

impl ReferenceCatalog {
    /// Catalog with every embedded library.
    pub fn builtin() -> Self {
        let mut libraries = IndexMap::new();
        for source in builtin_libraries() {
            if let ReferenceSource::Builtin { path, .. } = &source {
                let name = library_name(path);
                libraries.insert(name, source);
            }
        }
        Self {
            libraries,
            extras: Vec::new(),
            include_runtime_libraries: true,
        }
    }

    /// Catalog without any library.
    pub fn empty() -> Self {
        Self {
            libraries: IndexMap::new(),
            extras: Vec::new(),
            include_runtime_libraries: false,
        }
    }

    /// Register a reference file under the assembly name it declares.
    ///
    /// A registered library replaces a built-in one of the same name and is
    /// included in every dependency manifest.
    pub fn register_file(&mut self, path: impl AsRef<Path>) -> ForgeResult<String> {
        let source = ReferenceSource::File(path.as_ref().to_path_buf());
        let reference = source.load()?;
        debug!(assembly = %reference.name, path = %source.path(), "registered reference");

        let name = reference.name;
        if !self.extras.contains(&name) {
            self.extras.push(name.clone());
        }
        self.libraries.insert(name.clone(), source);
        Ok(name)
    }

    /// Remove a library. Compilations then leave it out of the manifest.
    pub fn remove(&mut self, assembly_name: &str) -> bool {
        self.extras.retain(|n| n != assembly_name);
        self.libraries.shift_remove(assembly_name).is_some()
    }

    pub fn lookup(&self, assembly_name: &str) -> Option<&ReferenceSource> {
        self.libraries.get(assembly_name)
    }

    pub fn contains(&self, assembly_name: &str) -> bool {
        self.libraries.contains_key(assembly_name)
    }

    /// Base libraries present in the catalog; missing ones are skipped.
    pub fn base_sources(&self) -> Vec<&ReferenceSource> {
        BASE_LIBRARIES
            .iter()
            .filter_map(|name| {
                let source = self.lookup(name);
                if source.is_none() {
                    warn!(assembly = name, "base library not found, leaving it out");
                }
                source
            })
            .collect()
    }

    /// Libraries that ship with `runtime`.
    pub fn runtime_sources(&self, runtime: TargetRuntime) -> Vec<ReferenceSource> {
        if self.include_runtime_libraries {
            builtin_runtime_libraries(runtime)
        } else {
            Vec::new()
        }
    }

    /// Registered extra libraries.
    pub fn extra_sources(&self) -> Vec<&ReferenceSource> {
        self.extras.iter().filter_map(|name| self.lookup(name)).collect()
    }

    pub fn library_names(&self) -> impl Iterator<Item = &str> {
        self.libraries.keys().map(String::as_str)
    }
}

impl Default for ReferenceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `builtin:refs/System.Linq.toml` -> `System.Linq`
fn library_name(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(".toml").unwrap_or(file).to_string()
}
