//! Error types for metadata loading and type registration.

use thiserror::Error;

/// Error type for reading and modelling a metadata file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed character or entity reference.
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid document structure.
    #[error("invalid metadata structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for registry operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A second entity was registered under a name already present.
    #[error("name collision: {incoming} '{name}' would replace existing {existing}")]
    NameCollision {
        /// Colliding name.
        name: String,
        /// Kind label of the registered entity.
        existing: String,
        /// Kind label of the rejected entity.
        incoming: String,
    },

    /// Type name not present in the registry.
    #[error("unresolved type '{name}'")]
    UnresolvedType {
        /// Type name.
        name: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

impl SchemaError {
    /// Creates an unresolved type error.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::UnresolvedType { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attr_message() {
        let err = ParseError::missing_attr("record", "name");
        assert_eq!(
            err.to_string(),
            "missing required attribute 'name' on element 'record'"
        );
    }

    #[test]
    fn test_parse_error_converts_into_schema_error() {
        let err: SchemaError = ParseError::invalid_structure("empty document").into();
        assert!(matches!(err, SchemaError::Parse(_)));
        assert!(err.to_string().contains("empty document"));
    }
}
