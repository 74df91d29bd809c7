//! Design token compilation for tessera.
//!
//! The [`Pipeline`] turns an entry token document into output text:
//! imports are resolved and merged, the result is validated, aliases are
//! substituted and values converted by a named [`Transform`], and the tokens
//! are rendered by a named [`Format`]. Every run also reports the files it
//! read, on success and on failure, so hosts can track dependencies.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod config;
mod error;
pub mod format;
pub mod graph;
mod options;
pub mod pipeline;
pub mod resolve;
pub mod transform;
pub mod validate;

pub use config::{Config, ConfigError, FormatConfig};
pub use error::{Error, ErrorKind, Failure, Result};
pub use format::{Format, render};
pub use options::{
    DEFAULT_FORMAT, DEFAULT_TRANSFORM, FormatOptions, GetOptions, Options, Preprocess,
    PropsFilter, PropsMap, TransformOptions,
};
pub use pipeline::{Output, Pipeline};
pub use resolve::{FsLoader, Loader, Resolver};
pub use transform::{Token, Transform, TransformedDocument, transform};
pub use validate::{Check, Validator};
