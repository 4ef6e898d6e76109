//! Code generation service

use classforge_codegen::{generate_source, is_valid_json};
use classforge_compiler::{CompilerBackend, CompilerConfig};
use classforge_core::{Diagnostic, ForgeError, ForgeResult, GenerationSettings};
use std::path::{Path, PathBuf};
use tokio::task::JoinError;
use tracing::debug;

/// Entry point for both pipelines.
///
/// Cloning is cheap; clones share the compiler cache.
#[derive(Debug, Clone, Default)]
pub struct CodeGenerationService {
    backend: CompilerBackend,
}

impl CodeGenerationService {
    /// Service with the built-in reference catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompilerConfig) -> Self {
        Self {
            backend: CompilerBackend::new(config),
        }
    }

    pub fn backend(&self) -> &CompilerBackend {
        &self.backend
    }

    /// Generate C# source for a JSON sample.
    pub fn generate_source(&self, json: &str, settings: &GenerationSettings) -> ForgeResult<String> {
        generate_source(json, settings)
    }

    /// Compile `source` into a module at `output_path`.
    pub fn compile(
        &self,
        source: &str,
        output_path: impl AsRef<Path>,
        settings: &GenerationSettings,
    ) -> ForgeResult<PathBuf> {
        self.backend.compile(source, output_path, settings)
    }

    /// Failing diagnostics for `source`; empty means it compiles.
    pub fn validate(&self, source: &str, settings: &GenerationSettings) -> ForgeResult<Vec<Diagnostic>> {
        self.backend.validate(source, settings)
    }

    pub fn is_valid_json(&self, json: &str) -> bool {
        is_valid_json(json)
    }

    pub async fn generate_source_async(
        &self,
        json: String,
        settings: GenerationSettings,
    ) -> ForgeResult<String> {
        debug!("scheduling generation on the blocking pool");
        tokio::task::spawn_blocking(move || generate_source(&json, &settings))
            .await
            .map_err(task_failed)?
    }

    pub async fn compile_async(
        &self,
        source: String,
        output_path: PathBuf,
        settings: GenerationSettings,
    ) -> ForgeResult<PathBuf> {
        let backend = self.backend.clone();
        debug!(path = %output_path.display(), "scheduling compilation on the blocking pool");
        tokio::task::spawn_blocking(move || backend.compile(&source, &output_path, &settings))
            .await
            .map_err(task_failed)?
    }

    pub async fn validate_async(
        &self,
        source: String,
        settings: GenerationSettings,
    ) -> ForgeResult<Vec<Diagnostic>> {
        let backend = self.backend.clone();
        tokio::task::spawn_blocking(move || backend.validate(&source, &settings))
            .await
            .map_err(task_failed)?
    }
}

fn task_failed(err: JoinError) -> ForgeError {
    ForgeError::Io(std::io::Error::other(format!("background task failed: {err}")))
}

#[cfg(test)]
#[path = "service/service_tests.rs"]
mod service_tests;
