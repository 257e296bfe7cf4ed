//! Pipeline phase trait.

use super::SchemaContext;
use crate::Result;

/// A phase in the schema pipeline.
///
/// Phases run in order and read or extend the shared context. Fatal
/// failures return an error; anything the run can continue past is
/// recorded as a diagnostic instead.
pub trait Phase: Send + Sync {
    fn run(&self, ctx: &mut SchemaContext<'_>) -> Result<()>;
}
