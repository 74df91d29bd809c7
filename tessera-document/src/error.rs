use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for document parsing (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<ParseError>>;

/// A token document could not be parsed.
///
/// The message is the underlying parser's message, unchanged.
#[derive(Debug, Error, Diagnostic)]
#[error("failed to parse '{}': {message}", .path.display())]
#[diagnostic(code(tessera::syntax_error))]
pub struct ParseError {
    #[source_code]
    pub src: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    pub path: PathBuf,
    pub message: String,
}

impl ParseError {
    /// Create a parse error for `path`, pointing at byte `offset` when known.
    pub fn new(
        path: &Path,
        content: &str,
        message: impl Into<String>,
        offset: Option<usize>,
    ) -> Box<Self> {
        Box::new(Self {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: offset.map(|o| SourceSpan::from(o.min(content.len()))),
            path: path.to_path_buf(),
            message: message.into(),
        })
    }
}

/// Convert a 1-based line/column pair into a byte offset within `content`.
pub(crate) fn offset_of(content: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (i, text) in content.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            return Some(offset + column.saturating_sub(1).min(text.len()));
        }
        offset += text.len();
    }
    Some(content.len())
}
