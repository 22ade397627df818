//! # gir2swift Schema
//!
//! GIR metadata model and loader.
//!
//! This crate provides:
//! - An owned XML element tree built with `quick-xml`
//! - The entity model (aliases, constants, enumerations, records, callables)
//! - The run-wide type registry with an explicit collision policy
//! - The metadata loader that fills the registry file by file

pub mod error;
pub mod functions;
pub mod loader;
pub mod registry;
pub mod tree;
pub mod types;

pub use error::{ParseError, SchemaError};
pub use functions::{Argument, Function};
pub use loader::{LoadReport, Loader, load_file, load_str, parse_entity};
pub use registry::{Collision, CollisionPolicy, Registration, TypeRegistry};
pub use tree::{XmlNode, parse_document, parse_file};
pub use types::{
    Alias, Constant, Documented, Entity, EntityBase, EntityKind, Enumeration, Member, Record,
    TypeRef,
};
