//! Compilation pipeline for token documents.
//!
//! This module provides a [`Pipeline`] orchestrator that drives one entry
//! document through the compilation phases:
//!
//! - `resolve` - load the entry and its imports into a merged document
//! - `validate` - check structure, failing fast
//! - `transform` - substitute aliases and convert values for the platform
//! - `format` - render the output text
//!
//! # Example
//!
//! ```ignore
//! use tessera_pipeline::{Options, Pipeline};
//!
//! let pipeline = Pipeline::new();
//! match pipeline.run("tokens/props.json", Options::new().format("scss")) {
//!     Ok(output) => println!("{}", output.text),
//!     Err(failure) => eprintln!("{} ({} files)", failure, failure.source_files.len()),
//! }
//! ```

mod context;
mod phase;
pub mod phases;
mod runner;

pub use context::CompilationContext;
pub use phase::{Phase, PhaseInfo};
pub use runner::{Output, Pipeline};
