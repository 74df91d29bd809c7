//! Built-in validation checks.

use tessera_document::MergedDocument;

use super::Check;
use crate::{Error, Result, graph::AliasGraph};

/// Every property carries a `value` and a non-empty `category`.
pub struct RequiredKeysCheck;

impl Check for RequiredKeysCheck {
    fn name(&self) -> &'static str {
        "required-keys"
    }

    fn check(&self, doc: &MergedDocument) -> Result<()> {
        for (name, prop) in &doc.properties {
            if prop.value.is_none() {
                return Err(Error::missing_key(name, "value"));
            }
            if prop.category.as_deref().is_none_or(|c| c.trim().is_empty()) {
                return Err(Error::missing_key(name, "category"));
            }
        }
        Ok(())
    }
}

/// Every `{!name}` reference resolves to a property or alias.
pub struct AliasReferenceCheck;

impl Check for AliasReferenceCheck {
    fn name(&self) -> &'static str {
        "alias-references"
    }

    fn check(&self, doc: &MergedDocument) -> Result<()> {
        let graph = AliasGraph::build(doc);
        if let Some((owner, alias)) = graph.first_undefined() {
            return Err(Box::new(Error::UndefinedAlias {
                owner: owner.clone(),
                alias: alias.to_string(),
            }));
        }
        Ok(())
    }
}

/// No value references itself, directly or transitively.
pub struct AliasCycleCheck;

impl Check for AliasCycleCheck {
    fn name(&self) -> &'static str {
        "alias-cycles"
    }

    fn check(&self, doc: &MergedDocument) -> Result<()> {
        AliasGraph::build(doc)
            .topological_order()
            .map(|_| ())
            .map_err(|cycle| Box::new(Error::AliasCycle { cycle }))
    }
}
