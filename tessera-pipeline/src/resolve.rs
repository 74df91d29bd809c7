//! Import resolution: loading an entry document and everything it imports.

use std::{
    collections::HashMap,
    io,
    path::{Component, Path, PathBuf},
};

use indexmap::IndexSet;
use tessera_document::{MergedDocument, Syntax, parse_document};
use tracing::{debug, trace};

use crate::{Error, Result};

/// Source of document text.
///
/// The resolver only ever reads through a loader, so hosts can serve
/// documents from memory or from a virtual filesystem.
pub trait Loader: Send + Sync {
    fn load(&self, path: &Path) -> io::Result<String>;
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl Loader for FsLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Make `path` absolute and remove `.` and `..` components lexically.
pub fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Recursively loads and merges token documents.
pub struct Resolver<'a> {
    loader: &'a dyn Loader,
}

impl<'a> Resolver<'a> {
    pub fn new(loader: &'a dyn Loader) -> Self {
        Self { loader }
    }

    /// Resolve `entry` into a merged document.
    ///
    /// Every file the traversal touches is added to `source_files`, including
    /// files that are missing or fail to parse, so the caller keeps an exact
    /// dependency list even when resolution fails.
    pub fn resolve(
        &self,
        entry: &Path,
        source_files: &mut IndexSet<PathBuf>,
    ) -> Result<MergedDocument> {
        let entry = normalize(entry);
        debug!(entry = %entry.display(), "resolving imports");

        let mut traversal = Traversal {
            loader: self.loader,
            stack: Vec::new(),
            completed: HashMap::new(),
            source_files,
        };
        let mut merged = traversal.visit(&entry, None)?;
        merged.source_files = traversal.source_files.clone();

        debug!(
            files = merged.source_files.len(),
            properties = merged.properties.len(),
            "imports resolved"
        );
        Ok(merged)
    }
}

struct Traversal<'a, 'b> {
    loader: &'a dyn Loader,
    /// Files currently being resolved, outermost first.
    stack: Vec<PathBuf>,
    /// Files fully resolved in this run, with their merged result.
    completed: HashMap<PathBuf, MergedDocument>,
    source_files: &'b mut IndexSet<PathBuf>,
}

impl Traversal<'_, '_> {
    fn visit(&mut self, path: &Path, importer: Option<&Path>) -> Result<MergedDocument> {
        if let Some(start) = self.stack.iter().position(|p| p == path) {
            let mut cycle = self.stack[start..].to_vec();
            cycle.push(path.to_path_buf());
            return Err(Box::new(Error::CyclicImport { cycle }));
        }
        if let Some(done) = self.completed.get(path) {
            trace!(path = %path.display(), "already resolved");
            return Ok(done.clone());
        }

        self.source_files.insert(path.to_path_buf());
        let content = self
            .loader
            .load(path)
            .map_err(|source| Error::missing_file(path, importer, source))?;
        let doc = parse_document(&content, path, Syntax::from_path(path))?;

        trace!(
            path = %path.display(),
            imports = doc.imports.len(),
            properties = doc.properties.len(),
            "parsed document"
        );

        let dir = path.parent().unwrap_or_else(|| Path::new("/")).to_path_buf();
        let imports = doc.imports.clone();

        self.stack.push(path.to_path_buf());
        let mut merged = MergedDocument::new();
        for specifier in &imports {
            let target = normalize(&dir.join(specifier));
            let imported = self.visit(&target, Some(path))?;
            merged.merge(&imported);
        }
        self.stack.pop();

        merged.merge_document(doc);
        self.completed.insert(path.to_path_buf(), merged.clone());
        Ok(merged)
    }
}
