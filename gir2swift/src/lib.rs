//! # gir2swift
//!
//! Generate Swift bindings for GObject-based libraries from GIR metadata.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gir2swift::prelude::*;
//!
//! let config = RunConfig::builder()
//!     .prerequisite("/usr/share/gir-1.0/GObject-2.0.gir")
//!     .file("/usr/share/gir-1.0/Gtk-3.0.gir")
//!     .output_dir("Sources/Gtk")
//!     .build()?;
//!
//! let summary = gir2swift::run(config)?;
//! println!("{} types added", summary.types_added());
//! # Ok::<(), gir2swift::Gir2SwiftError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - GIR entity model, type registry and loader
//! - [`codegen`] - Code DSL and Swift emitters
//! - [`config`] - Run configuration
//! - [`driver`] - Load and emit phases over a list of files
//! - [`sink`] - Output destinations

pub mod config;
pub mod driver;
pub mod error;
pub mod prelude;
pub mod sink;

/// GIR entity model, type registry and loader.
pub mod schema {
    pub use gir2swift_schema::*;
}

/// Code DSL and Swift emitters.
pub mod codegen {
    pub use gir2swift_codegen::*;
}

pub use config::{RunConfig, RunConfigBuilder};
pub use driver::{Driver, FileFailure, RunSummary, run};
pub use error::Gir2SwiftError;
pub use sink::{ModuleFileSink, OutputSink, SplitFileSink, StreamSink};
