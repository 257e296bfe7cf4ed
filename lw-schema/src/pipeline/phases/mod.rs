//! Built-in pipeline phases.

mod build;
mod collect;

pub use build::BuildPhase;
pub use collect::CollectPhase;
