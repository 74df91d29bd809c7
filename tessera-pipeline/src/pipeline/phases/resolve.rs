//! Resolve phase - loads the entry document and its imports.

use std::sync::Arc;

use crate::{
    Result,
    pipeline::{CompilationContext, Phase},
    resolve::{Loader, Resolver},
};

/// Phase that builds the merged document.
pub struct ResolvePhase {
    loader: Arc<dyn Loader>,
}

impl ResolvePhase {
    pub fn new(loader: Arc<dyn Loader>) -> Self {
        Self { loader }
    }
}

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Load the entry document and merge its imports"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let resolver = Resolver::new(self.loader.as_ref());
        let merged = resolver.resolve(&ctx.entry, &mut ctx.source_files)?;
        ctx.merged = Some(merged);
        Ok(())
    }
}
