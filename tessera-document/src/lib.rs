//! Design token document model for tessera.
//!
//! A token document is a JSON or YAML mapping of `props`, `aliases`,
//! `imports` and a file-local `global` block. This crate parses one
//! document at a time and provides the [`MergedDocument`] that import
//! resolution folds documents into. Resolution itself lives in
//! `tessera-pipeline`.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod alias;
mod document;
mod error;
mod merged;
mod parse;

pub use document::{Document, Global, Meta, Property};
pub use error::{ParseError, Result};
pub use merged::MergedDocument;
pub use parse::{Syntax, parse_document};
