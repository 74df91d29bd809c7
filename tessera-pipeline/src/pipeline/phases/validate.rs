//! Validate phase - checks the merged document.

use std::sync::Arc;

use crate::{
    Result,
    pipeline::{CompilationContext, Phase},
    validate::Validator,
};

/// Phase that validates the merged document.
pub struct ValidatePhase {
    validator: Arc<Validator>,
}

impl ValidatePhase {
    pub fn new(validator: Arc<Validator>) -> Self {
        Self { validator }
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check required keys and alias references"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        match &ctx.merged {
            Some(merged) => self.validator.validate(merged),
            None => Ok(()),
        }
    }
}
