//! Compilation backend: parse, bind, emit.

use crate::binder::{self, Binding};
use crate::cache::{CacheStats, CompilerCache};
use crate::module::{ASSEMBLY_VERSION, ModuleManifest, ModuleWriter};
use crate::options::{CompilationOptions, CompilerConfig};
use crate::parser;
use crate::references::ReferenceAssembly;
use classforge_core::{
    Diagnostic, ForgeError, ForgeResult, GenerationSettings, Severity, TargetRuntime,
    format_diagnostics,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const NETFX_DOWNLOAD_URL: &str = "https://dotnet.microsoft.com/download/dotnet-framework";

/// Compiles generated source into modules.
///
/// Clones share one [`CompilerCache`].
///
/// # Example
///
/// ```no_run
/// use classforge_compiler::CompilerBackend;
/// use classforge_core::GenerationSettings;
///
/// let backend = CompilerBackend::default();
/// let settings = GenerationSettings::default();
/// let source = "namespace RpaJsonModels { public class Root { public int Id { get; set; } } }";
///
/// let failures = backend.validate(source, &settings)?;
/// assert!(failures.is_empty());
///
/// backend.compile(source, "out/RpaJsonModels.dll", &settings)?;
/// # Ok::<(), classforge_core::ForgeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompilerBackend {
    config: CompilerConfig,
    cache: Arc<CompilerCache>,
}

/// Outcome of parsing and binding, before any failure check.
struct Analysis {
    diagnostics: Vec<Diagnostic>,
    binding: Binding,
    references: Vec<Arc<ReferenceAssembly>>,
}

impl CompilerBackend {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            cache: Arc::new(CompilerCache::new()),
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Failing diagnostics for `source`, sorted by line. Empty means the
    /// source compiles.
    pub fn validate(&self, source: &str, settings: &GenerationSettings) -> ForgeResult<Vec<Diagnostic>> {
        if source.trim().is_empty() {
            return Err(ForgeError::InvalidInput("source code is empty".to_string()));
        }

        let options = self.options(settings);
        let analysis = self.analyze(source, settings, &options)?;
        Ok(failures(&analysis.diagnostics))
    }

    /// Compile `source` and write the module to `output_path`.
    ///
    /// Nothing is written when compilation fails. An existing file at
    /// `output_path` is replaced on success.
    pub fn compile(
        &self,
        source: &str,
        output_path: impl AsRef<Path>,
        settings: &GenerationSettings,
    ) -> ForgeResult<PathBuf> {
        let output_path = output_path.as_ref();
        if source.trim().is_empty() {
            return Err(ForgeError::InvalidInput("source code is empty".to_string()));
        }
        if output_path.as_os_str().is_empty() {
            return Err(ForgeError::InvalidInput("output path is empty".to_string()));
        }

        self.check_environment(settings.target_runtime)?;

        let options = self.options(settings);
        let analysis = self.analyze(source, settings, &options)?;

        let failures = failures(&analysis.diagnostics);
        if !failures.is_empty() {
            for diagnostic in &failures {
                error!(
                    code = %diagnostic.code,
                    line = diagnostic.line,
                    "{}",
                    diagnostic.message
                );
            }
            let report = format_diagnostics(&failures, settings.target_runtime);
            return Err(ForgeError::Compilation {
                diagnostics: failures,
                report,
            });
        }

        let writer = self.module_writer(source, settings, &options, &analysis)?;
        writer.write(output_path)?;

        info!(
            path = %output_path.display(),
            assembly = %settings.namespace,
            runtime = %settings.target_runtime,
            types = analysis.binding.types.type_count(),
            "module written"
        );
        Ok(output_path.to_path_buf())
    }

    fn check_environment(&self, runtime: TargetRuntime) -> ForgeResult<()> {
        if runtime.requires_system_install() && !self.config.netfx_probe_path.exists() {
            return Err(ForgeError::Environment(format!(
                "{} is not installed on this machine. Please install it from {NETFX_DOWNLOAD_URL}",
                runtime.display_name()
            )));
        }
        Ok(())
    }

    fn options(&self, settings: &GenerationSettings) -> CompilationOptions {
        self.cache
            .options(settings.optimize_output, self.config.warnings_as_errors)
    }

    fn analyze(
        &self,
        source: &str,
        settings: &GenerationSettings,
        options: &CompilationOptions,
    ) -> ForgeResult<Analysis> {
        let (unit, mut diagnostics) = parser::parse(source);
        debug!(
            members = unit.members.len(),
            diagnostics = diagnostics.len(),
            "parsed source"
        );

        let references = self.references(settings)?;
        let binding = binder::bind(&unit, &references);
        diagnostics.extend(binding.diagnostics.iter().cloned());

        if options.warnings_as_errors {
            for diagnostic in &mut diagnostics {
                if diagnostic.severity == Severity::Warning {
                    diagnostic.warning_as_error = true;
                }
            }
        }
        diagnostics.sort_by_key(|d| d.line);

        Ok(Analysis {
            diagnostics,
            binding,
            references,
        })
    }

    /// Dependency manifest: base libraries, runtime libraries, the JSON
    /// library, then registered extras. Each assembly version appears once.
    fn references(&self, settings: &GenerationSettings) -> ForgeResult<Vec<Arc<ReferenceAssembly>>> {
        let catalog = &self.config.catalog;
        let mut references = Vec::new();

        for source in catalog.base_sources() {
            references.push(self.cache.reference(source)?);
        }

        let runtime = settings.target_runtime;
        let runtime_libraries = self.cache.runtime_libraries(runtime, || {
            catalog
                .runtime_sources(runtime)
                .iter()
                .map(|source| self.cache.reference(source))
                .collect()
        })?;
        references.extend(runtime_libraries.iter().cloned());

        let json_assembly = settings.json_library.assembly_name();
        match catalog.lookup(json_assembly) {
            Some(source) => references.push(self.cache.reference(source)?),
            None => warn!(
                assembly = json_assembly,
                "JSON library not found, leaving it out"
            ),
        }

        for source in catalog.extra_sources() {
            references.push(self.cache.reference(source)?);
        }

        let mut seen = HashSet::new();
        references.retain(|r| seen.insert((r.name.clone(), r.version.clone())));

        debug!(count = references.len(), %runtime, "dependency manifest assembled");
        Ok(references)
    }

    fn module_writer(
        &self,
        source: &str,
        settings: &GenerationSettings,
        options: &CompilationOptions,
        analysis: &Analysis,
    ) -> ForgeResult<ModuleWriter> {
        let mut manifest = ModuleManifest::new(
            &settings.namespace,
            ASSEMBLY_VERSION,
            settings.target_runtime,
            settings.json_library,
            options.clone(),
        );
        for reference in &analysis.references {
            manifest.add_reference(&reference.name, &reference.version, &reference.source);
        }

        let mut writer = ModuleWriter::new(manifest).add_metadata(&analysis.binding.types)?;
        if options.embeds_source() {
            writer = writer.add_source(&format!("{}.cs", settings.root_class_name), source);
        }
        Ok(writer)
    }
}

fn failures(diagnostics: &[Diagnostic]) -> Vec<Diagnostic> {
    diagnostics.iter().filter(|d| d.is_failure()).cloned().collect()
}
