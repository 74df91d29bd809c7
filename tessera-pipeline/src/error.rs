//! Error taxonomy for a pipeline run.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use tessera_document::ParseError;
use thiserror::Error;

use crate::graph::Symbol;

/// Result type for pipeline stages (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Stable, machine-readable error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    MissingFile,
    CyclicImport,
    Validation,
    UnknownTransform,
    UnsupportedValue,
    UnknownFormat,
}

impl ErrorKind {
    /// The stable name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Syntax => "SyntaxError",
            Self::MissingFile => "MissingFileError",
            Self::CyclicImport => "CyclicImportError",
            Self::Validation => "ValidationError",
            Self::UnknownTransform => "UnknownTransformError",
            Self::UnsupportedValue => "UnsupportedValueError",
            Self::UnknownFormat => "UnknownFormatError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(ParseError),

    #[error("failed to read '{}'{}", .path.display(), imported_from(.importer))]
    #[diagnostic(
        code(tessera::missing_file),
        help("imports are resolved relative to the directory of the importing file")
    )]
    MissingFile {
        path: PathBuf,
        importer: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("cyclic import: {}", join_paths(.cycle))]
    #[diagnostic(code(tessera::cyclic_import))]
    CyclicImport { cycle: Vec<PathBuf> },

    #[error("Property \"{property}\" contained no \"{key}\" key")]
    #[diagnostic(code(tessera::missing_key))]
    MissingKey { property: String, key: &'static str },

    #[error("{owner} references undefined alias \"{alias}\"")]
    #[diagnostic(
        code(tessera::undefined_alias),
        help("declare \"{alias}\" as a property or under \"aliases\"")
    )]
    UndefinedAlias { owner: Symbol, alias: String },

    #[error("alias cycle: {}", .cycle.join(" -> "))]
    #[diagnostic(code(tessera::alias_cycle))]
    AliasCycle { cycle: Vec<String> },

    #[error("unknown transform '{name}'")]
    #[diagnostic(code(tessera::unknown_transform), help("valid transforms are: {valid}"))]
    UnknownTransform { name: String, valid: String },

    #[error("Property \"{property}\" cannot be converted by '{transform}': {reason}")]
    #[diagnostic(code(tessera::unsupported_value))]
    UnsupportedValue {
        property: String,
        transform: &'static str,
        reason: String,
    },

    #[error("unknown format '{name}'")]
    #[diagnostic(code(tessera::unknown_format), help("valid formats are: {valid}"))]
    UnknownFormat { name: String, valid: String },
}

impl Error {
    /// The stable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::MissingFile { .. } => ErrorKind::MissingFile,
            Self::CyclicImport { .. } => ErrorKind::CyclicImport,
            Self::MissingKey { .. } | Self::UndefinedAlias { .. } | Self::AliasCycle { .. } => {
                ErrorKind::Validation
            }
            Self::UnknownTransform { .. } => ErrorKind::UnknownTransform,
            Self::UnsupportedValue { .. } => ErrorKind::UnsupportedValue,
            Self::UnknownFormat { .. } => ErrorKind::UnknownFormat,
        }
    }

    pub(crate) fn missing_file(
        path: &Path,
        importer: Option<&Path>,
        source: std::io::Error,
    ) -> Box<Self> {
        Box::new(Self::MissingFile {
            path: path.to_path_buf(),
            importer: importer.map(Path::to_path_buf),
            source,
        })
    }

    pub(crate) fn missing_key(property: &str, key: &'static str) -> Box<Self> {
        Box::new(Self::MissingKey {
            property: property.to_string(),
            key,
        })
    }

    pub(crate) fn unsupported_value(
        property: &str,
        transform: &'static str,
        reason: impl Into<String>,
    ) -> Box<Self> {
        Box::new(Self::UnsupportedValue {
            property: property.to_string(),
            transform,
            reason: reason.into(),
        })
    }
}

impl From<Box<ParseError>> for Box<Error> {
    fn from(err: Box<ParseError>) -> Self {
        Box::new(Error::Syntax(*err))
    }
}

fn imported_from(importer: &Option<PathBuf>) -> String {
    match importer {
        Some(path) => format!(" (imported from '{}')", path.display()),
        None => String::new(),
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// A failed run, carrying every file read before the failure.
///
/// The file list lets the host keep tracking dependencies of builds that
/// currently fail.
#[derive(Debug, Error, Diagnostic)]
#[error("{error}")]
#[diagnostic(forward(error))]
pub struct Failure {
    pub error: Error,
    pub source_files: Vec<PathBuf>,
}

impl Failure {
    /// The stable kind of the underlying error.
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}
