//! Structural validation of a merged document.
//!
//! Validation runs an ordered list of [`Check`]s and stops at the first
//! failure; there is no partial output for an invalid document.

mod checks;

use tessera_document::MergedDocument;
use tracing::debug;

pub use checks::{AliasCycleCheck, AliasReferenceCheck, RequiredKeysCheck};

use crate::Result;

/// A structural check over a merged document.
pub trait Check: Send + Sync {
    /// The name of this check.
    fn name(&self) -> &'static str;

    /// Check the document, returning the first violation found.
    fn check(&self, doc: &MergedDocument) -> Result<()>;
}

/// Runs checks in order, failing fast.
pub struct Validator {
    checks: Vec<Box<dyn Check>>,
}

impl Validator {
    /// Create a validator with the built-in checks.
    pub fn new() -> Self {
        Self {
            checks: vec![
                Box::new(RequiredKeysCheck),
                Box::new(AliasReferenceCheck),
                Box::new(AliasCycleCheck),
            ],
        }
    }

    /// Create a validator with no checks.
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a check after the existing ones.
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Validate a merged document.
    pub fn validate(&self, doc: &MergedDocument) -> Result<()> {
        for check in &self.checks {
            debug!(check = check.name(), "running check");
            check.check(doc)?;
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
