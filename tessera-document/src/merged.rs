//! The result of folding an entry document together with its imports.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::{Document, Property};

/// An entry document merged with everything it transitively imports.
///
/// Later merges override earlier ones for the same name while keeping the
/// position of the first declaration, so imports merged before the
/// importer's own properties lose to them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedDocument {
    /// Properties in first-declaration order.
    pub properties: IndexMap<String, Property>,
    /// Merged alias table.
    pub aliases: IndexMap<String, Value>,
    /// Unrecognized top-level keys, merged with the same precedence.
    pub extra: IndexMap<String, Value>,
    /// Every file read while resolving, each recorded once.
    pub source_files: IndexSet<PathBuf>,
}

impl MergedDocument {
    /// Create an empty merged document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another merged document on top of this one.
    ///
    /// Source files are not touched; the resolver owns that list.
    pub fn merge(&mut self, other: &MergedDocument) {
        for (name, prop) in &other.properties {
            self.properties.insert(name.clone(), prop.clone());
        }
        for (name, value) in &other.aliases {
            self.aliases.insert(name.clone(), value.clone());
        }
        for (key, value) in &other.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// Merge a single parsed document on top of this one.
    pub fn merge_document(&mut self, doc: Document) {
        for (name, prop) in doc.properties {
            self.properties.insert(name, prop);
        }
        for (name, value) in doc.meta.aliases {
            self.aliases.insert(name, value);
        }
        for (key, value) in doc.meta.extra {
            self.extra.insert(key, value);
        }
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Remove a property, keeping the order of the remaining ones.
    pub fn remove_property(&mut self, name: &str) -> Option<Property> {
        self.properties.shift_remove(name)
    }

    /// Whether `path` was read during resolution.
    pub fn reads(&self, path: &Path) -> bool {
        self.source_files.contains(path)
    }
}
