//! Generation and compilation settings

use crate::{ForgeError, ForgeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Target runtime / language-version combination for the emitted module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRuntime {
    #[serde(rename = "netstandard2.0")]
    NetStandard20,
    #[serde(rename = "netstandard2.1")]
    NetStandard21,
    #[serde(rename = "net48")]
    NetFramework48,
    #[serde(rename = "net6.0")]
    Net60,
    #[serde(rename = "net7.0")]
    Net70,
    #[serde(rename = "net8.0")]
    Net80,
    #[serde(rename = "net9.0")]
    Net90,
}

impl TargetRuntime {
    /// Every supported runtime, in declaration order.
    pub const ALL: [TargetRuntime; 7] = [
        TargetRuntime::NetStandard20,
        TargetRuntime::NetStandard21,
        TargetRuntime::NetFramework48,
        TargetRuntime::Net60,
        TargetRuntime::Net70,
        TargetRuntime::Net80,
        TargetRuntime::Net90,
    ];

    /// Target framework moniker (e.g. `netstandard2.1`).
    #[must_use]
    pub fn moniker(&self) -> &'static str {
        match self {
            Self::NetStandard20 => "netstandard2.0",
            Self::NetStandard21 => "netstandard2.1",
            Self::NetFramework48 => "net48",
            Self::Net60 => "net6.0",
            Self::Net70 => "net7.0",
            Self::Net80 => "net8.0",
            Self::Net90 => "net9.0",
        }
    }

    /// Human readable product name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NetStandard20 => ".NET Standard 2.0",
            Self::NetStandard21 => ".NET Standard 2.1",
            Self::NetFramework48 => ".NET Framework 4.8",
            Self::Net60 => ".NET 6.0",
            Self::Net70 => ".NET 7.0",
            Self::Net80 => ".NET 8.0",
            Self::Net90 => ".NET 9.0",
        }
    }

    /// Parse a runtime from its moniker.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.moniker() == s)
    }

    /// Whether compiling for this runtime needs a system-wide install.
    ///
    /// Only .NET Framework 4.8 does; every other runtime ships its reference
    /// libraries with the compiler.
    #[must_use]
    pub fn requires_system_install(&self) -> bool {
        matches!(self, Self::NetFramework48)
    }
}

impl fmt::Display for TargetRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.moniker())
    }
}

/// JSON library the generated classes are annotated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JsonLibrary {
    #[serde(rename = "Newtonsoft.Json")]
    NewtonsoftJson,
    #[serde(rename = "System.Text.Json")]
    SystemTextJson,
}

impl JsonLibrary {
    /// Assembly name of the library, used for reference lookup.
    #[must_use]
    pub fn assembly_name(&self) -> &'static str {
        match self {
            Self::NewtonsoftJson => "Newtonsoft.Json",
            Self::SystemTextJson => "System.Text.Json",
        }
    }

    /// Namespaces imported by generated source.
    #[must_use]
    pub fn namespaces(&self) -> &'static [&'static str] {
        match self {
            Self::NewtonsoftJson => &["Newtonsoft.Json", "Newtonsoft.Json.Serialization"],
            Self::SystemTextJson => &["System.Text.Json", "System.Text.Json.Serialization"],
        }
    }

    /// Attribute used to carry the original JSON key.
    #[must_use]
    pub fn property_attribute(&self) -> &'static str {
        match self {
            Self::NewtonsoftJson => "JsonProperty",
            Self::SystemTextJson => "JsonPropertyName",
        }
    }

    /// Parse a library from its assembly name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Newtonsoft.Json" | "newtonsoft" => Some(Self::NewtonsoftJson),
            "System.Text.Json" | "system-text-json" => Some(Self::SystemTextJson),
            _ => None,
        }
    }
}

impl fmt::Display for JsonLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.assembly_name())
    }
}

/// Settings shared by source generation and compilation.
///
/// Immutable for the duration of a call; callers own it and pass it by
/// reference into both pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Runtime the compiled module targets
    pub target_runtime: TargetRuntime,

    /// JSON library variant for usings, attributes, and the reference manifest
    pub json_library: JsonLibrary,

    /// Namespace wrapping every generated class; also the module name
    pub namespace: String,

    /// Name of the class generated for the document root
    pub root_class_name: String,

    /// Upper-case the first character of member names
    pub use_naming_convention: bool,

    /// Emit `{ get; set; }` properties instead of public fields
    pub use_accessor_style: bool,

    /// Emit an empty public constructor in every class
    pub generate_default_constructor: bool,

    /// Emit an attribute carrying the original JSON key on each member
    pub generate_serialization_annotations: bool,

    /// Emit XML documentation comments
    pub generate_documentation: bool,

    /// Build the module in release mode
    pub optimize_output: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            target_runtime: TargetRuntime::NetStandard21,
            json_library: JsonLibrary::SystemTextJson,
            namespace: "RpaJsonModels".to_string(),
            root_class_name: "Root".to_string(),
            use_naming_convention: true,
            use_accessor_style: true,
            generate_default_constructor: false,
            generate_serialization_annotations: true,
            generate_documentation: false,
            optimize_output: true,
        }
    }
}

impl GenerationSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from JSON bytes; empty input yields defaults
    pub fn from_json(bytes: &[u8]) -> ForgeResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
            .map_err(|e| ForgeError::InvalidInput(format!("invalid settings JSON: {e}")))
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> ForgeResult<Self> {
        toml::from_str(content)
            .map_err(|e| ForgeError::InvalidInput(format!("invalid settings TOML: {e}")))
    }

    /// Load settings from a `.toml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> ForgeResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(content.as_bytes()),
            _ => Self::from_toml(&content),
        }
    }

    /// Render settings as TOML
    pub fn to_toml(&self) -> ForgeResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ForgeError::InvalidInput(format!("cannot serialize settings: {e}")))
    }

    pub fn with_target_runtime(mut self, runtime: TargetRuntime) -> Self {
        self.target_runtime = runtime;
        self
    }

    pub fn with_json_library(mut self, library: JsonLibrary) -> Self {
        self.json_library = library;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_root_class_name(mut self, name: impl Into<String>) -> Self {
        self.root_class_name = name.into();
        self
    }
}

#[cfg(test)]
#[path = "settings/settings_tests.rs"]
mod settings_tests;
