//! Compilation context passed through pipeline phases.

use std::path::PathBuf;

use indexmap::IndexSet;
use tessera_document::MergedDocument;

use crate::{Options, transform::TransformedDocument};

/// State of one run, filled in phase by phase.
#[derive(Debug)]
pub struct CompilationContext {
    /// The entry document path as given by the caller.
    pub entry: PathBuf,
    /// Effective options, after the `get_options` hook.
    pub options: Options,
    /// Every file read so far.
    pub source_files: IndexSet<PathBuf>,
    /// The merged document (populated by the resolve phase).
    pub merged: Option<MergedDocument>,
    /// The transformed document (populated by the transform phase).
    pub transformed: Option<TransformedDocument>,
    /// Rendered text (populated by the format phase).
    pub output: Option<String>,
}

impl CompilationContext {
    /// Create a new context for `entry`.
    pub fn new(entry: impl Into<PathBuf>, options: Options) -> Self {
        Self {
            entry: entry.into(),
            options,
            source_files: IndexSet::new(),
            merged: None,
            transformed: None,
            output: None,
        }
    }

    /// The source files read so far, in first-read order.
    pub fn source_files(&self) -> Vec<PathBuf> {
        self.source_files.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let ctx = CompilationContext::new("/t/props.json", Options::new());

        assert!(ctx.merged.is_none());
        assert!(ctx.transformed.is_none());
        assert!(ctx.output.is_none());
        assert!(ctx.source_files().is_empty());
    }
}
