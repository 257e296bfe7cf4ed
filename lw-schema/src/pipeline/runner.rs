//! Pipeline orchestrator.

use leafwise_tree::EntryTree;

use super::{
    Phase, SchemaContext,
    phases::{BuildPhase, CollectPhase},
};
use crate::{DocumentMeta, ModuleFilter, Result};

/// Runs the collect phase and then the build phase.
///
/// ```ignore
/// let ctx = Pipeline::new().run(&tree, ModuleFilter::from_csv("ietf"), DocumentMeta::default())?;
/// for diag in ctx.warnings() {
///     eprintln!("{}", diag);
/// }
/// ```
pub struct Pipeline {
    collect_only: bool,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            collect_only: false,
        }
    }

    /// Stop after path collection; no document is built.
    pub fn collect_only(mut self) -> Self {
        self.collect_only = true;
        self
    }

    /// Run every phase against the tree.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error of any phase. Shape conflicts are not
    /// fatal here; they are recorded as error diagnostics on the context.
    pub fn run<'a>(
        &self,
        tree: &'a EntryTree,
        filter: ModuleFilter,
        meta: DocumentMeta,
    ) -> Result<SchemaContext<'a>> {
        let mut ctx = SchemaContext::new(tree, filter, meta);

        let mut phases: Vec<Box<dyn Phase>> = vec![Box::new(CollectPhase)];
        if !self.collect_only {
            phases.push(Box::new(BuildPhase));
        }

        for phase in &phases {
            phase.run(&mut ctx)?;
        }
        Ok(ctx)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use leafwise_tree::testing::tree_from;

    use super::*;

    #[test]
    fn test_pipeline_runs_builtin_phases() {
        let tree = EntryTree::default();
        let ctx = Pipeline::new()
            .run(&tree, ModuleFilter::all(), DocumentMeta::default())
            .unwrap();

        assert!(ctx.indices.is_some());
        assert!(ctx.document.is_some());
    }

    #[test]
    fn test_collect_only() {
        let tree = EntryTree::default();
        let ctx = Pipeline::new()
            .collect_only()
            .run(&tree, ModuleFilter::all(), DocumentMeta::default())
            .unwrap();

        assert!(ctx.indices.is_some());
        assert!(ctx.document.is_none());
    }

    #[test]
    fn test_shape_conflicts_become_error_diagnostics() {
        let first = r#"
            [module]
            name = "first"
            prefix = "f"

            [nodes.top]
            kind = "container"

            [nodes.top.children.port]
            kind = "leaf"
            type = "uint16"
        "#;
        let second = r#"
            [module]
            name = "second"
            prefix = "s"

            [nodes.top]
            kind = "container"

            [nodes.top.children.port]
            kind = "leaf"
            type = "string"
        "#;
        let tree = tree_from(&[first, second]);
        let ctx = Pipeline::new()
            .run(&tree, ModuleFilter::all(), DocumentMeta::default())
            .unwrap();

        assert!(ctx.has_errors());
        let errors: Vec<String> = ctx.errors().map(ToString::to_string).collect();
        assert_eq!(
            errors,
            vec!["error: property 'port' is already integer, cannot use it as string (at /second:top/port)"]
        );
        assert!(ctx.document.is_some());
    }
}
