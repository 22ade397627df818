//! Prelude module for convenient imports.
//!
//! ```
//! use gir2swift::prelude::*;
//! ```

pub use crate::config::{RunConfig, RunConfigBuilder};
pub use crate::driver::{Driver, RunSummary};
pub use crate::error::Gir2SwiftError;
pub use crate::sink::{ModuleFileSink, OutputSink, SplitFileSink, StreamSink};

pub use gir2swift_codegen::{Code, CodeBuilder, GeneratedUnit, Generator, GeneratorOptions};
pub use gir2swift_schema::{CollisionPolicy, Entity, EntityKind, LoadReport, TypeRegistry};
