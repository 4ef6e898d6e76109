//! # classforge
//!
//! Generate C# data classes from a JSON sample and compile them into a
//! loadable module.
//!
//! classforge runs two independent pipelines:
//! - **Generation**: JSON text is inferred into a class tree and rendered as
//!   C# source, named and annotated according to [`GenerationSettings`]
//! - **Compilation**: C# source (generated or hand-edited) is checked
//!   against the reference libraries of the target runtime and packaged as a
//!   module with its type table
//!
//! ## Quick Start
//!
//! ```no_run
//! use classforge::prelude::*;
//!
//! let service = CodeGenerationService::new();
//! let settings = GenerationSettings::default();
//!
//! let source = service.generate_source(r#"{"user_name": "Ann", "age": 30}"#, &settings)?;
//! let failures = service.validate(&source, &settings)?;
//! assert!(failures.is_empty());
//!
//! service.compile(&source, "out/RpaJsonModels.dll", &settings)?;
//! # Ok::<(), ForgeError>(())
//! ```
//!
//! ## Async
//!
//! Both pipelines are synchronous. The `*_async` methods run them on tokio's
//! blocking pool so an editor can keep its event loop responsive:
//!
//! ```no_run
//! # async fn run() -> classforge::ForgeResult<()> {
//! use classforge::prelude::*;
//!
//! let service = CodeGenerationService::new();
//! let source = service
//!     .generate_source_async(r#"{"id": 1}"#.to_string(), GenerationSettings::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`classforge_core`] - Settings, errors, and diagnostics
//! - [`classforge_codegen`] - Schema inference and source emission
//! - [`classforge_compiler`] - Compiler front end and module format

mod service;

pub use service::CodeGenerationService;

// Re-export core types
pub use classforge_core::{
    Diagnostic, DiagnosticsReport, ForgeError, ForgeResult, GenerationSettings, JsonLibrary,
    Severity, TargetRuntime, format_diagnostics,
};

// Re-export pipeline entry points
pub use classforge_codegen::{generate_source, is_valid_json};
pub use classforge_compiler::{
    CompilerBackend, CompilerConfig, ModuleReader, ReferenceCatalog, TypeTable,
};

// Re-export common dependencies
pub use serde;
pub use tokio;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use classforge::prelude::*;` to import the service, settings and
/// error types.
pub mod prelude {
    pub use crate::{
        CodeGenerationService, CompilerConfig, Diagnostic, ForgeError, ForgeResult,
        GenerationSettings, JsonLibrary, ModuleReader, Severity, TargetRuntime,
    };
}
