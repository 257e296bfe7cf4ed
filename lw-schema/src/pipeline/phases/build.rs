//! Build phase: turn the config index into the schema document.

use crate::{
    Error, Result, SchemaBuilder, SchemaDocument,
    builder::BUILD_PHASE,
    pipeline::{Phase, SchemaContext},
};

/// Builds the document from the indices of the collect phase.
pub struct BuildPhase;

impl Phase for BuildPhase {
    fn run(&self, ctx: &mut SchemaContext<'_>) -> Result<()> {
        let indices = ctx.indices.as_ref().ok_or_else(|| {
            Box::new(Error::PhaseOrder {
                phase: BUILD_PHASE,
                missing: "collected paths",
            })
        })?;

        let mut document = SchemaDocument::new(ctx.meta.clone());
        let mut builder = SchemaBuilder::new(ctx.tree, &indices.all);
        builder.build_into(&mut document, &indices.config)?;

        ctx.diagnostics.extend(builder.into_diagnostics());
        ctx.document = Some(document);
        Ok(())
    }
}
