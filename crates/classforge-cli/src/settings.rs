//! Settings resolution: settings file first, then command-line overrides

use anyhow::{Context, Result};
use clap::Args;
use classforge_core::{GenerationSettings, JsonLibrary, TargetRuntime};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Settings file (.toml or .json)
    #[arg(long = "settings")]
    pub file: Option<PathBuf>,

    /// Target runtime moniker (netstandard2.0, netstandard2.1, net48, net6.0, net7.0, net8.0, net9.0)
    #[arg(long, value_parser = parse_runtime)]
    pub runtime: Option<TargetRuntime>,

    /// JSON library (System.Text.Json or Newtonsoft.Json)
    #[arg(long = "json-library", value_parser = parse_json_library)]
    pub json_library: Option<JsonLibrary>,

    /// Namespace wrapping the generated classes
    #[arg(long)]
    pub namespace: Option<String>,

    /// Name of the root class
    #[arg(long = "root-class")]
    pub root_class: Option<String>,

    /// Emit public fields instead of properties
    #[arg(long)]
    pub fields: bool,

    /// Keep member names as written in the JSON
    #[arg(long = "keep-case")]
    pub keep_case: bool,

    /// Leave out serialization annotations
    #[arg(long = "no-annotations")]
    pub no_annotations: bool,

    /// Emit a default constructor in every class
    #[arg(long)]
    pub constructors: bool,

    /// Emit XML documentation comments
    #[arg(long)]
    pub docs: bool,

    /// Debug build: no optimization, source embedded in the module
    #[arg(long)]
    pub debug: bool,
}

impl SettingsArgs {
    /// Load the settings file, if any, and apply flag overrides.
    pub fn resolve(&self) -> Result<GenerationSettings> {
        let mut settings = match &self.file {
            Some(path) => GenerationSettings::from_file(path)
                .with_context(|| format!("Failed to load settings: {}", path.display()))?,
            None => GenerationSettings::default(),
        };

        if let Some(runtime) = self.runtime {
            settings.target_runtime = runtime;
        }
        if let Some(library) = self.json_library {
            settings.json_library = library;
        }
        if let Some(namespace) = &self.namespace {
            settings.namespace = namespace.clone();
        }
        if let Some(root_class) = &self.root_class {
            settings.root_class_name = root_class.clone();
        }
        if self.fields {
            settings.use_accessor_style = false;
        }
        if self.keep_case {
            settings.use_naming_convention = false;
        }
        if self.no_annotations {
            settings.generate_serialization_annotations = false;
        }
        if self.constructors {
            settings.generate_default_constructor = true;
        }
        if self.docs {
            settings.generate_documentation = true;
        }
        if self.debug {
            settings.optimize_output = false;
        }

        Ok(settings)
    }
}

fn parse_runtime(value: &str) -> Result<TargetRuntime, String> {
    TargetRuntime::parse(value).ok_or_else(|| {
        let known: Vec<&str> = TargetRuntime::ALL.iter().map(|r| r.moniker()).collect();
        format!("unknown runtime '{value}' (expected one of: {})", known.join(", "))
    })
}

fn parse_json_library(value: &str) -> Result<JsonLibrary, String> {
    JsonLibrary::parse(value).ok_or_else(|| {
        format!("unknown JSON library '{value}' (expected System.Text.Json or Newtonsoft.Json)")
    })
}
