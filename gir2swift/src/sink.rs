//! Output sinks for generated code.
//!
//! A sink receives the units generated for one module at a time. Where the
//! text ends up (a stream, one file per module, one file per entity) is up
//! to the sink.

use crate::error::Gir2SwiftError;
use gir2swift_codegen::{GeneratedUnit, join_units};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Destination for generated code.
pub trait OutputSink {
    /// Writes the units generated for `module`.
    ///
    /// # Errors
    /// Returns `Gir2SwiftError::Io` if the output cannot be written.
    fn write_module(
        &mut self,
        module: &str,
        units: &[GeneratedUnit],
    ) -> Result<(), Gir2SwiftError>;
}

/// Writes all modules to one stream.
pub struct StreamSink<W: Write> {
    writer: W,
}

impl StreamSink<std::io::Stdout> {
    /// Creates a sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> StreamSink<W> {
    /// Creates a sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for StreamSink<W> {
    fn write_module(
        &mut self,
        module: &str,
        units: &[GeneratedUnit],
    ) -> Result<(), Gir2SwiftError> {
        tracing::debug!("Writing {} units of {} to stream", units.len(), module);
        self.writer.write_all(join_units(units).as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Prepends `boilerplate` to `code`, separated by a blank line.
fn with_boilerplate(boilerplate: Option<&str>, code: &str) -> String {
    match boilerplate.map(str::trim_end).filter(|b| !b.is_empty()) {
        Some(boilerplate) if code.is_empty() => format!("{boilerplate}\n"),
        Some(boilerplate) => format!("{boilerplate}\n\n{code}"),
        None => code.to_string(),
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), Gir2SwiftError> {
    std::fs::write(path, content)?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

/// Writes one `<Module>.swift` file per module.
pub struct ModuleFileSink {
    dir: PathBuf,
    boilerplate: Option<String>,
}

impl ModuleFileSink {
    /// Creates a sink writing into `dir`.
    ///
    /// `boilerplate` is placed at the top of every module file.
    pub fn new(dir: impl Into<PathBuf>, boilerplate: Option<String>) -> Self {
        Self {
            dir: dir.into(),
            boilerplate,
        }
    }

    /// Path of the file written for `module`.
    #[must_use]
    pub fn module_path(&self, module: &str) -> PathBuf {
        self.dir.join(format!("{module}.swift"))
    }
}

impl OutputSink for ModuleFileSink {
    fn write_module(
        &mut self,
        module: &str,
        units: &[GeneratedUnit],
    ) -> Result<(), Gir2SwiftError> {
        std::fs::create_dir_all(&self.dir)?;
        let content = with_boilerplate(self.boilerplate.as_deref(), &join_units(units));
        write_file(&self.module_path(module), &content)
    }
}

/// Writes one `<Name>.swift` file per entity.
///
/// The boilerplate, if any, goes to `<Module>.swift`.
pub struct SplitFileSink {
    dir: PathBuf,
    boilerplate: Option<String>,
}

impl SplitFileSink {
    /// Creates a sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>, boilerplate: Option<String>) -> Self {
        Self {
            dir: dir.into(),
            boilerplate,
        }
    }
}

impl OutputSink for SplitFileSink {
    fn write_module(
        &mut self,
        module: &str,
        units: &[GeneratedUnit],
    ) -> Result<(), Gir2SwiftError> {
        std::fs::create_dir_all(&self.dir)?;

        if let Some(boilerplate) = &self.boilerplate {
            let path = self.dir.join(format!("{module}.swift"));
            write_file(&path, &with_boilerplate(Some(boilerplate), ""))?;
        }

        for unit in units {
            let path = self.dir.join(format!("{}.swift", unit.name));
            write_file(&path, &format!("{}\n", unit.code))?;
        }
        Ok(())
    }
}
