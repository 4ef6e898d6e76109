//! Per-backend caches
//!
//! Parsed references are cached by source path, compilation options by the
//! optimize flag, and the resolved runtime library set by target runtime.
//! Each map has its own lock so a slow reference load never blocks an
//! options lookup.

use crate::options::CompilationOptions;
use crate::references::{ReferenceAssembly, ReferenceSource};
use classforge_core::{ForgeResult, TargetRuntime};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub type RuntimeLibraries = Arc<Vec<Arc<ReferenceAssembly>>>;

/// Entry counts, for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub references: usize,
    pub options: usize,
    pub runtimes: usize,
}

#[derive(Debug, Default)]
pub struct CompilerCache {
    references: Mutex<HashMap<String, Arc<ReferenceAssembly>>>,
    options: Mutex<HashMap<bool, CompilationOptions>>,
    runtime_libraries: Mutex<HashMap<TargetRuntime, RuntimeLibraries>>,
}

impl CompilerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed reference for `source`, loading it on first use.
    pub fn reference(&self, source: &ReferenceSource) -> ForgeResult<Arc<ReferenceAssembly>> {
        let key = source.path();
        if let Some(hit) = self.references.lock().get(&key) {
            debug!(path = %key, "reference cache hit");
            return Ok(Arc::clone(hit));
        }

        debug!(path = %key, "reference cache miss");
        let loaded = Arc::new(source.load()?);
        let mut references = self.references.lock();
        Ok(Arc::clone(references.entry(key).or_insert(loaded)))
    }

    /// Options for the optimize flag, built once.
    pub fn options(&self, optimize: bool, warnings_as_errors: bool) -> CompilationOptions {
        self.options
            .lock()
            .entry(optimize)
            .or_insert_with(|| {
                debug!(optimize, "building compilation options");
                CompilationOptions::for_optimize(optimize, warnings_as_errors)
            })
            .clone()
    }

    /// Runtime library set for `runtime`, resolved with `resolve` once.
    pub fn runtime_libraries<F>(&self, runtime: TargetRuntime, resolve: F) -> ForgeResult<RuntimeLibraries>
    where
        F: FnOnce() -> ForgeResult<Vec<Arc<ReferenceAssembly>>>,
    {
        if let Some(hit) = self.runtime_libraries.lock().get(&runtime) {
            debug!(%runtime, "runtime libraries cache hit");
            return Ok(Arc::clone(hit));
        }

        debug!(%runtime, "resolving runtime libraries");
        let resolved = Arc::new(resolve()?);
        let mut libraries = self.runtime_libraries.lock();
        Ok(Arc::clone(libraries.entry(runtime).or_insert(resolved)))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            references: self.references.lock().len(),
            options: self.options.lock().len(),
            runtimes: self.runtime_libraries.lock().len(),
        }
    }
}
