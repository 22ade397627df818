//! # gir2swift Codegen
//!
//! Swift binding generation from GIR metadata.
//!
//! This crate provides:
//! - A small text composition DSL ([`Code`], [`CodeBuilder`])
//! - Native-to-Swift type translation
//! - One emitter per entity kind
//! - A [`Generator`] walking the entities of a loaded file

pub mod builder;
pub mod error;
pub mod generator;
pub mod swift;

pub use builder::{Code, CodeBuilder, DEFAULT_INDENTATION, IGNORED};
pub use error::CodegenError;
pub use generator::{GeneratedUnit, Generator, GeneratorOptions, join_units};

use gir2swift_schema::{Loader, TypeRegistry, parse_document};

/// Generates Swift code from a GIR document string.
///
/// The document is loaded into a fresh registry, so it may only reference
/// types it declares itself.
///
/// # Arguments
/// * `xml` - GIR document content
///
/// # Returns
/// Generated Swift code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing or loading fails.
pub fn generate_from_xml(xml: &str) -> Result<String, CodegenError> {
    let root = parse_document(xml)?;
    let mut registry = TypeRegistry::new();
    let report = Loader::new(&mut registry).load(&root)?;
    let generator = Generator::new(&registry);
    Ok(generator.generate(&report))
}

/// Generates Swift code from a GIR file.
///
/// # Arguments
/// * `path` - Path to the GIR file
///
/// # Returns
/// Generated Swift code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or loading fails.
pub fn generate_from_file(path: &std::path::Path) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml)
}
