//! Collect phase: assign every node its canonical path.

use crate::{
    Result, collect,
    pipeline::{Phase, SchemaContext},
};

const PHASE: &str = "collect";

/// Walks the selected modules and stores both path indices in the context.
pub struct CollectPhase;

impl Phase for CollectPhase {
    fn run(&self, ctx: &mut SchemaContext<'_>) -> Result<()> {
        let tree = ctx.tree;

        let skipped: Vec<String> = tree
            .list_modules()
            .filter_map(|module| {
                ctx.filter
                    .matching_pattern(module)
                    .map(|pattern| format!("skipping module '{}' (matches '{}')", module, pattern))
            })
            .collect();
        for message in skipped {
            ctx.add_info(PHASE, message);
        }
        let unused: Vec<String> = ctx
            .filter
            .patterns()
            .iter()
            .filter(|p| !tree.list_modules().any(|m| m.contains(p.as_str())))
            .cloned()
            .collect();
        for pattern in unused {
            ctx.add_warning(PHASE, format!("skip pattern '{}' matches no loaded module", pattern));
        }

        let indices = collect::collect(tree, &ctx.filter);
        if indices.config.is_empty() {
            ctx.add_warning(PHASE, "no configuration nodes selected");
        }
        ctx.indices = Some(indices);
        Ok(())
    }
}
