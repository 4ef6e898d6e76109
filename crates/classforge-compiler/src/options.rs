//! Compilation options and backend configuration

use crate::references::ReferenceCatalog;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default install directory probed before compiling for .NET Framework 4.8.
pub const DEFAULT_NETFX_PROBE_PATH: &str = r"C:\Windows\Microsoft.NET\Framework\v4.0.30319";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Optimization {
    Release,
    Debug,
}

impl fmt::Display for Optimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Optimization::Release => f.write_str("Release"),
            Optimization::Debug => f.write_str("Debug"),
        }
    }
}

/// Options applied to one compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationOptions {
    pub optimization: Optimization,
    pub warning_level: u8,
    pub warnings_as_errors: bool,
    pub deterministic: bool,
    pub allow_unsafe: bool,
    pub platform: String,
}

impl CompilationOptions {
    /// Release options when `optimize` is set, Debug otherwise.
    pub fn for_optimize(optimize: bool, warnings_as_errors: bool) -> Self {
        Self {
            optimization: if optimize {
                Optimization::Release
            } else {
                Optimization::Debug
            },
            warning_level: 4,
            warnings_as_errors,
            deterministic: true,
            allow_unsafe: true,
            platform: "AnyCpu".to_string(),
        }
    }

    /// Debug builds embed the source in the module.
    pub fn embeds_source(&self) -> bool {
        self.optimization == Optimization::Debug
    }
}

/// Configuration for a [`CompilerBackend`](crate::CompilerBackend).
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Libraries available to compilations
    pub catalog: ReferenceCatalog,

    /// Directory whose presence signals a .NET Framework 4.8 install
    pub netfx_probe_path: PathBuf,

    /// Promote warnings to errors
    pub warnings_as_errors: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            catalog: ReferenceCatalog::builtin(),
            netfx_probe_path: PathBuf::from(DEFAULT_NETFX_PROBE_PATH),
            warnings_as_errors: false,
        }
    }
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: ReferenceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_netfx_probe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.netfx_probe_path = path.into();
        self
    }

    pub fn with_warnings_as_errors(mut self, enabled: bool) -> Self {
        self.warnings_as_errors = enabled;
        self
    }
}
