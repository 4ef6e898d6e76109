//! classforge-compiler - Compiler front end and module emitter
//!
//! Checks generated (and possibly hand-edited) C# data classes against a
//! catalog of reference assemblies and packages the result as a module.
//!
//! ```text
//! source text
//!     ↓
//!  [lexer]       tokens
//!     ↓
//!  [parser]      CompilationUnit + syntax diagnostics
//!     ↓
//!  [binder]      TypeTable + semantic diagnostics
//!     ↓            (references from [references], cached in [cache])
//!  [module]      manifest.json, metadata.json, source/
//! ```
//!
//! [`CompilerBackend`] drives the pipeline.

pub mod backend;
pub mod binder;
pub mod cache;
pub mod lexer;
pub mod metadata;
pub mod module;
pub mod options;
pub mod parser;
pub mod references;
pub mod syntax;

pub use backend::CompilerBackend;
pub use cache::{CacheStats, CompilerCache};
pub use metadata::{MemberEntry, MemberKind, TypeEntry, TypeTable};
pub use module::{ModuleError, ModuleManifest, ModuleReader, ModuleWriter};
pub use options::{CompilationOptions, CompilerConfig, DEFAULT_NETFX_PROBE_PATH, Optimization};
pub use references::{ReferenceAssembly, ReferenceCatalog, ReferenceSource};
