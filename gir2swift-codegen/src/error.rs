//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Metadata parse error.
    #[error("metadata parse error: {0}")]
    Parse(#[from] gir2swift_schema::ParseError),

    /// Registry or loader error.
    #[error("schema error: {0}")]
    Schema(#[from] gir2swift_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
