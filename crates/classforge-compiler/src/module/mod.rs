//! Compiled module format
//!
//! A module is a zip archive holding everything a host needs to load the
//! compiled data classes:
//!
//! ```text
//! RpaJsonModels.dll
//! ├── manifest.json        # assembly identity, target, references, checksums
//! ├── metadata.json        # type table: namespaces, types, members
//! └── source/
//!     └── Root.cs          # embedded source, debug builds only
//! ```
//!
//! Archives are deterministic: entries are written in a fixed order with a
//! fixed timestamp and permissions, so identical inputs give identical bytes.

mod error;
mod manifest;

pub mod reader;
pub mod writer;

pub use error::{ModuleError, ModuleResult};
pub use manifest::{AssemblyInfo, FileInfo, ModuleManifest, ReferenceInfo};
pub use reader::ModuleReader;
pub use writer::{ModuleWriter, compute_sha256, verify_sha256};

/// Module file extension.
pub const MODULE_EXTENSION: &str = "dll";

/// Current module format version.
pub const MODULE_VERSION: &str = "1.0";

/// Manifest file name within the module.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Type table file name within the module.
pub const METADATA_FILE: &str = "metadata.json";

/// Directory holding embedded source files.
pub const SOURCE_DIR: &str = "source";

/// Version stamped on every compiled assembly.
pub const ASSEMBLY_VERSION: &str = "1.0.0.0";
