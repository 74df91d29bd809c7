//! Transform phase - runs `preprocess`, then the named transform.

use crate::{
    Result,
    pipeline::{CompilationContext, Phase},
    transform::transform,
};

/// Phase that produces the transformed document.
pub struct TransformPhase;

impl Phase for TransformPhase {
    fn name(&self) -> &'static str {
        "transform"
    }

    fn description(&self) -> &'static str {
        "Resolve aliases and convert values for the target platform"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let Some(merged) = ctx.merged.as_mut() else {
            return Ok(());
        };
        if let Some(preprocess) = &ctx.options.transform.preprocess {
            preprocess(merged);
        }
        ctx.transformed = Some(transform(merged, &ctx.options.transform.name)?);
        Ok(())
    }
}
