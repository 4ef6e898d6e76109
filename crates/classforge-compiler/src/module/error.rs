//! Error types for module operations.

use classforge_core::ForgeError;
use thiserror::Error;

pub type ModuleResult<T> = Result<T, ModuleError>;

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("Missing required file: {0}")]
    MissingFile(String),
}

impl From<ModuleError> for ForgeError {
    fn from(err: ModuleError) -> Self {
        match err {
            ModuleError::Io(io) => ForgeError::Io(io),
            other => ForgeError::Module(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn ModuleError___checksum_mismatch___displays_all_fields() {
        let err = ModuleError::ChecksumMismatch {
            path: "metadata.json".to_string(),
            expected: "sha256:expected".to_string(),
            actual: "sha256:actual".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("metadata.json"));
        assert!(msg.contains("sha256:expected"));
        assert!(msg.contains("sha256:actual"));
    }

    #[test]
    fn ModuleError___into_forge_error___io_kept_as_io() {
        let err = ModuleError::Io(std::io::Error::other("disk full"));

        let forge: ForgeError = err.into();

        assert!(matches!(forge, ForgeError::Io(_)));
    }

    #[test]
    fn ModuleError___into_forge_error___others_become_module_errors() {
        let err = ModuleError::MissingFile("manifest.json".to_string());

        let forge: ForgeError = err.into();

        assert_eq!(forge.error_code(), 5);
        assert_eq!(
            forge.to_string(),
            "module error: Missing required file: manifest.json"
        );
    }
}
