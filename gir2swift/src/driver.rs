//! Generation run driver.
//!
//! Prerequisite files are loaded first, for their types only. Each main file
//! is then loaded and emitted before the next one is read, so a file sees
//! every type declared by the prerequisites and by the files before it.

use crate::config::RunConfig;
use crate::error::Gir2SwiftError;
use crate::sink::OutputSink;
use gir2swift_codegen::Generator;
use gir2swift_schema::{LoadReport, TypeRegistry, load_file};
use std::path::{Path, PathBuf};

/// A file that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    /// Failing file.
    pub path: PathBuf,
    /// What went wrong.
    pub error: Gir2SwiftError,
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Registered names before the run.
    pub types_before: usize,
    /// Registered names after the run.
    pub types_after: usize,
    /// Main files emitted successfully.
    pub files_emitted: usize,
    /// Units written across all files.
    pub units_written: usize,
    /// Files that failed, in processing order.
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    /// Number of names added by the run.
    #[must_use]
    pub fn types_added(&self) -> usize {
        self.types_after.saturating_sub(self.types_before)
    }

    /// Returns true if no file failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Module name used when a file declares no namespace.
///
/// `Gtk-3.0.gir` yields `Gtk`.
fn fallback_module_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.split_once('-') {
        Some((name, _)) if !name.is_empty() => name.to_string(),
        _ => stem,
    }
}

/// Runs the load and emit phases over the configured files.
pub struct Driver {
    config: RunConfig,
    registry: TypeRegistry,
}

impl Driver {
    /// Creates a driver with an empty registry.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        let registry = TypeRegistry::with_policy(config.collision_policy());
        Self { config, registry }
    }

    /// Returns the run configuration.
    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Returns the registry filled so far.
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Loads one metadata file into the registry.
    ///
    /// # Errors
    /// Returns `Gir2SwiftError::Load` if the file cannot be read, parsed or
    /// loaded. Entities registered before the failure stay registered.
    pub fn load(&mut self, path: &Path) -> Result<LoadReport, Gir2SwiftError> {
        load_file(path, &mut self.registry).map_err(|err| Gir2SwiftError::load(path, err))
    }

    /// Loads one main file and writes its code to `sink`.
    ///
    /// Returns the number of units written.
    ///
    /// # Errors
    /// Returns `Gir2SwiftError` if loading fails or the sink cannot write.
    pub fn process_file(
        &mut self,
        path: &Path,
        sink: &mut dyn OutputSink,
    ) -> Result<usize, Gir2SwiftError> {
        let report = self.load(path)?;
        let fallback = fallback_module_name(path);
        let module = report.module_name(&fallback);

        let generator = Generator::with_options(&self.registry, self.config.generator_options());
        let units = generator.generate_units(&report);
        sink.write_module(module, &units)?;

        tracing::debug!(
            "Generated {} units for module {} from {}",
            units.len(),
            module,
            path.display()
        );
        Ok(units.len())
    }

    /// Processes the prerequisites, then every main file, writing to `sink`.
    ///
    /// A failing file is logged and recorded in the summary; later files are
    /// still processed unless fail-fast is configured.
    ///
    /// # Errors
    /// Returns the first file error when fail-fast is configured.
    pub fn run(&mut self, sink: &mut dyn OutputSink) -> Result<RunSummary, Gir2SwiftError> {
        let mut summary = RunSummary {
            types_before: self.registry.count(),
            ..RunSummary::default()
        };

        let prerequisites = self.config.prerequisites().to_vec();
        for path in &prerequisites {
            match self.load(path) {
                Ok(report) => tracing::debug!(
                    "Loaded prerequisite {} ({} entities)",
                    path.display(),
                    report.entities.len()
                ),
                Err(err) => self.record_failure(path, err, &mut summary)?,
            }
        }

        let files = self.config.files().to_vec();
        for path in &files {
            match self.process_file(path, sink) {
                Ok(units) => {
                    summary.files_emitted += 1;
                    summary.units_written += units;
                }
                Err(err) => self.record_failure(path, err, &mut summary)?,
            }
        }

        summary.types_after = self.registry.count();
        if self.config.verbose() {
            tracing::info!(
                "Processed {} types (total: {}).",
                summary.types_added(),
                summary.types_after
            );
        }
        Ok(summary)
    }

    fn record_failure(
        &self,
        path: &Path,
        err: Gir2SwiftError,
        summary: &mut RunSummary,
    ) -> Result<(), Gir2SwiftError> {
        if self.config.fail_fast() {
            return Err(err);
        }
        tracing::error!("{}", err);
        summary.failures.push(FileFailure {
            path: path.to_path_buf(),
            error: err,
        });
        Ok(())
    }
}

/// Runs a complete generation with the sink selected by `config`.
///
/// # Errors
/// Returns `Gir2SwiftError` if the sink cannot be created, or the first file
/// error when fail-fast is configured.
pub fn run(config: RunConfig) -> Result<RunSummary, Gir2SwiftError> {
    let mut sink = config.sink()?;
    Driver::new(config).run(sink.as_mut())
}
