//! Error types for generation runs.

use gir2swift_schema::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for generation runs.
#[derive(Debug, Error)]
pub enum Gir2SwiftError {
    /// Loading a metadata file failed.
    #[error("failed to load {}: {source}", path.display())]
    Load {
        /// File being loaded.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: SchemaError,
    },

    /// IO error while reading inputs or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid run configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Gir2SwiftError {
    /// Creates a load error for `path`.
    pub fn load(path: impl Into<PathBuf>, source: SchemaError) -> Self {
        Self::Load {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_names_file() {
        let err = Gir2SwiftError::load("Gtk-3.0.gir", SchemaError::unresolved("Widget"));
        let message = err.to_string();
        assert!(message.starts_with("failed to load Gtk-3.0.gir: "));
        assert!(message.contains("Widget"));
    }

    #[test]
    fn test_config_error_display() {
        let err = Gir2SwiftError::Config("no input files".to_string());
        assert_eq!(err.to_string(), "invalid configuration: no input files");
    }
}
