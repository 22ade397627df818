//! Run configuration and its builder.

use crate::error::Gir2SwiftError;
use crate::sink::{ModuleFileSink, OutputSink, SplitFileSink, StreamSink};
use gir2swift_codegen::{DEFAULT_INDENTATION, GeneratorOptions};
use gir2swift_schema::CollisionPolicy;
use std::path::{Path, PathBuf};

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    files: Vec<PathBuf>,
    prerequisites: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    boilerplate: Option<PathBuf>,
    split: bool,
    generate_all: bool,
    verbose: bool,
    fail_fast: bool,
    collision_policy: CollisionPolicy,
    indentation: String,
}

impl RunConfig {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::new()
    }

    /// Metadata files to generate code for, in processing order.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Metadata files loaded for their types only.
    #[must_use]
    pub fn prerequisites(&self) -> &[PathBuf] {
        &self.prerequisites
    }

    /// Output directory; `None` writes to standard output.
    #[must_use]
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// File whose content is prepended to each module file.
    #[must_use]
    pub fn boilerplate(&self) -> Option<&Path> {
        self.boilerplate.as_deref()
    }

    /// Whether each entity goes to its own file.
    #[must_use]
    pub fn split(&self) -> bool {
        self.split
    }

    /// Whether private entities are generated.
    #[must_use]
    pub fn generate_all(&self) -> bool {
        self.generate_all
    }

    /// Whether a summary is reported at the end of the run.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Whether the run stops at the first failing file.
    #[must_use]
    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Policy applied to duplicate names.
    #[must_use]
    pub fn collision_policy(&self) -> CollisionPolicy {
        self.collision_policy
    }

    /// Emitter settings derived from this configuration.
    #[must_use]
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            indentation: self.indentation.clone(),
            generate_all: self.generate_all,
        }
    }

    /// Creates the output sink selected by this configuration.
    ///
    /// # Errors
    /// Returns `Gir2SwiftError::Io` if the boilerplate file cannot be read.
    pub fn sink(&self) -> Result<Box<dyn OutputSink>, Gir2SwiftError> {
        let Some(dir) = &self.output_dir else {
            return Ok(Box::new(StreamSink::stdout()));
        };

        let boilerplate = match &self.boilerplate {
            Some(path) => Some(std::fs::read_to_string(path)?),
            None => None,
        };

        Ok(if self.split {
            Box::new(SplitFileSink::new(dir, boilerplate))
        } else {
            Box::new(ModuleFileSink::new(dir, boilerplate))
        })
    }
}

/// Builder for [`RunConfig`].
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: RunConfig {
                files: Vec::new(),
                prerequisites: Vec::new(),
                output_dir: None,
                boilerplate: None,
                split: false,
                generate_all: false,
                verbose: false,
                fail_fast: false,
                collision_policy: CollisionPolicy::default(),
                indentation: DEFAULT_INDENTATION.to_string(),
            },
        }
    }

    /// Adds a metadata file to generate code for.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.files.push(path.into());
        self
    }

    /// Adds several metadata files to generate code for.
    #[must_use]
    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config.files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Adds a prerequisite metadata file.
    #[must_use]
    pub fn prerequisite(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.prerequisites.push(path.into());
        self
    }

    /// Adds several prerequisite metadata files.
    #[must_use]
    pub fn prerequisites<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config
            .prerequisites
            .extend(paths.into_iter().map(Into::into));
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    /// Sets the module boilerplate file.
    #[must_use]
    pub fn boilerplate(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.boilerplate = Some(path.into());
        self
    }

    /// Writes one file per entity.
    #[must_use]
    pub fn split(mut self, enabled: bool) -> Self {
        self.config.split = enabled;
        self
    }

    /// Generates private entities too.
    #[must_use]
    pub fn generate_all(mut self, enabled: bool) -> Self {
        self.config.generate_all = enabled;
        self
    }

    /// Reports a summary at the end of the run.
    #[must_use]
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.config.verbose = enabled;
        self
    }

    /// Stops at the first failing file.
    #[must_use]
    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.config.fail_fast = enabled;
        self
    }

    /// Sets the collision policy.
    #[must_use]
    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.config.collision_policy = policy;
        self
    }

    /// Sets the indentation unit.
    #[must_use]
    pub fn indentation(mut self, indentation: impl Into<String>) -> Self {
        self.config.indentation = indentation.into();
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    /// Returns `Gir2SwiftError::Config` if no input file was given, or if
    /// split output or boilerplate is requested without an output directory.
    pub fn build(self) -> Result<RunConfig, Gir2SwiftError> {
        let config = self.config;
        if config.files.is_empty() {
            return Err(Gir2SwiftError::Config("no input files".to_string()));
        }
        if config.output_dir.is_none() && config.split {
            return Err(Gir2SwiftError::Config(
                "split output requires an output directory".to_string(),
            ));
        }
        if config.output_dir.is_none() && config.boilerplate.is_some() {
            return Err(Gir2SwiftError::Config(
                "module boilerplate requires an output directory".to_string(),
            ));
        }
        Ok(config)
    }
}

impl Default for RunConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = RunConfig::builder()
            .file("Gtk-3.0.gir")
            .build()
            .expect("Failed to build");

        assert_eq!(config.files(), [PathBuf::from("Gtk-3.0.gir")]);
        assert!(config.prerequisites().is_empty());
        assert!(config.output_dir().is_none());
        assert!(!config.split());
        assert!(!config.generate_all());
        assert!(!config.fail_fast());
        assert_eq!(config.collision_policy(), CollisionPolicy::Replace);

        let options = config.generator_options();
        assert_eq!(options.indentation, DEFAULT_INDENTATION);
        assert!(!options.generate_all);
    }

    #[test]
    fn test_builder_settings() {
        let config = RunConfig::builder()
            .files(["Gtk-3.0.gir", "Gdk-3.0.gir"])
            .prerequisites(["GLib-2.0.gir"])
            .prerequisite("GObject-2.0.gir")
            .output_dir("Sources")
            .split(true)
            .generate_all(true)
            .verbose(true)
            .fail_fast(true)
            .collision_policy(CollisionPolicy::KeepFirst)
            .indentation("\t")
            .build()
            .expect("Failed to build");

        assert_eq!(config.files().len(), 2);
        assert_eq!(config.prerequisites().len(), 2);
        assert_eq!(config.output_dir(), Some(Path::new("Sources")));
        assert!(config.split());
        assert!(config.verbose());
        assert_eq!(config.collision_policy(), CollisionPolicy::KeepFirst);
        assert_eq!(config.generator_options().indentation, "\t");
        assert!(config.generator_options().generate_all);
    }

    #[test]
    fn test_builder_requires_files() {
        let err = RunConfig::builder().build().unwrap_err();
        assert!(matches!(err, Gir2SwiftError::Config(_)));
    }

    #[test]
    fn test_split_requires_output_dir() {
        let err = RunConfig::builder()
            .file("Gtk-3.0.gir")
            .split(true)
            .build()
            .unwrap_err();
        assert!(matches!(err, Gir2SwiftError::Config(_)));
    }

    #[test]
    fn test_missing_boilerplate_fails_sink_creation() {
        let config = RunConfig::builder()
            .file("Gtk-3.0.gir")
            .output_dir("Sources")
            .boilerplate("/nonexistent/Gtk.swift")
            .build()
            .expect("Failed to build");
        assert!(matches!(config.sink(), Err(Gir2SwiftError::Io(_))));
    }
}
