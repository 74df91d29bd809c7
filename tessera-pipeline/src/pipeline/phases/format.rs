//! Format phase - renders the output text.

use crate::{
    Result,
    format::render,
    pipeline::{CompilationContext, Phase},
};

/// Phase that renders the transformed document.
pub struct FormatPhase;

impl Phase for FormatPhase {
    fn name(&self) -> &'static str {
        "format"
    }

    fn description(&self) -> &'static str {
        "Render tokens with the selected format"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        if let Some(doc) = &ctx.transformed {
            ctx.output = Some(render(doc, &ctx.options.format)?);
        }
        Ok(())
    }
}
