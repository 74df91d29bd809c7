//! Core utilities and types for the tessera design token compiler.
//!
//! This crate provides the text-level building blocks shared by the
//! pipeline and the command line: name casing, indented code building
//! and writing generated artifacts to disk.

mod code_builder;
mod file;
mod indent;
mod utils;

pub use code_builder::CodeBuilder;
pub use file::{Artifact, DepFile, WriteResult};
pub use indent::Indent;
pub use utils::{split_words, to_camel_case, to_kebab_case};
