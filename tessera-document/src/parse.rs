//! Parsing token documents from JSON or YAML text.

use std::path::Path;

use crate::{
    Document, Result,
    document::RawDocument,
    error::{ParseError, offset_of},
};

/// Source syntax of a token document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Json,
    Yaml,
}

impl Syntax {
    /// Pick the syntax from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Parse `content` read from `path`.
///
/// This is a pure function of its inputs; `path` is only recorded on the
/// document and used for error reporting.
pub fn parse_document(content: &str, path: &Path, syntax: Syntax) -> Result<Document> {
    let raw: RawDocument = match syntax {
        Syntax::Json => serde_json::from_str(content).map_err(|e| {
            let offset = offset_of(content, e.line(), e.column());
            ParseError::new(path, content, e.to_string(), offset)
        })?,
        Syntax::Yaml => serde_yaml::from_str(content).map_err(|e| {
            let offset = e.location().map(|l| l.index());
            ParseError::new(path, content, e.to_string(), offset)
        })?,
    };
    Ok(raw.into_document(path.to_path_buf()))
}
