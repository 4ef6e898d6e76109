//! classforge-codegen - JSON to C# data classes
//!
//! The generation pipeline is
//!
//! ```text
//! JSON text
//!     ↓
//!  [json]      JsonValue
//!     ↓
//!  [infer]     ClassTree (sanitized names from [naming])
//!     ↓
//!  [csharp]    source text
//! ```
//!
//! # Example
//!
//! ```
//! use classforge_codegen::generate_source;
//! use classforge_core::GenerationSettings;
//!
//! let code = generate_source(r#"{"items": [{"id": 1}]}"#, &GenerationSettings::default())?;
//! assert!(code.contains("public Item[] Items { get; set; }"));
//! # Ok::<(), classforge_core::ForgeError>(())
//! ```

pub mod csharp;
pub mod descriptor;
pub mod infer;
pub mod json;
pub mod naming;

pub use csharp::emit_source;
pub use descriptor::{ClassDescriptor, ClassTree, PrimitiveKind, PropertyDescriptor, TypeDescriptor};
pub use infer::infer_classes;
pub use json::{JsonValue, is_valid_json};

use classforge_core::{ForgeResult, GenerationSettings};
use tracing::debug;

/// Generate C# source for the JSON document in `json`.
///
/// Fails with `ForgeError::InvalidInput` when the text is empty or is not
/// JSON. Output is deterministic for the same input and settings.
pub fn generate_source(json: &str, settings: &GenerationSettings) -> ForgeResult<String> {
    let document = JsonValue::parse(json)?;
    let tree = infer_classes(&document, settings);
    let code = emit_source(&tree, settings);

    debug!(
        classes = tree.class_count(),
        bytes = code.len(),
        "generated source"
    );

    Ok(code)
}

#[cfg(test)]
mod lib_tests;
