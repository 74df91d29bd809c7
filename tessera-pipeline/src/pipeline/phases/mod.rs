//! Built-in pipeline phases.

mod format;
mod resolve;
mod transform;
mod validate;

pub use format::FormatPhase;
pub use resolve::ResolvePhase;
pub use transform::TransformPhase;
pub use validate::ValidatePhase;
