//! State shared by the pipeline phases.

use leafwise_tree::EntryTree;

use super::diagnostic::Diagnostic;
use crate::{DocumentMeta, Error, ModuleFilter, PathIndices, Result, SchemaDocument};

/// Context passed through all pipeline phases.
///
/// Borrows the entry tree for the length of the run and accumulates the
/// indices, the document and diagnostics as phases complete.
#[derive(Debug)]
pub struct SchemaContext<'a> {
    pub tree: &'a EntryTree,
    pub filter: ModuleFilter,
    pub meta: DocumentMeta,
    /// Path indices (populated by CollectPhase).
    pub indices: Option<PathIndices>,
    /// The generated document (populated by BuildPhase).
    pub document: Option<SchemaDocument>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> SchemaContext<'a> {
    pub fn new(tree: &'a EntryTree, filter: ModuleFilter, meta: DocumentMeta) -> Self {
        Self {
            tree,
            filter,
            meta,
            indices: None,
            document: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
    }

    /// Take the document out of the context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PhaseOrder`] if BuildPhase has not run.
    pub fn take_document(&mut self) -> Result<SchemaDocument> {
        self.document.take().ok_or_else(|| {
            Box::new(Error::PhaseOrder {
                phase: "take_document",
                missing: "a built document",
            })
        })
    }

    /// Take the path indices out of the context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PhaseOrder`] if CollectPhase has not run.
    pub fn take_indices(&mut self) -> Result<PathIndices> {
        self.indices.take().ok_or_else(|| {
            Box::new(Error::PhaseOrder {
                phase: "take_indices",
                missing: "collected paths",
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let tree = EntryTree::default();
        let ctx = SchemaContext::new(&tree, ModuleFilter::all(), DocumentMeta::default());

        assert!(ctx.indices.is_none());
        assert!(ctx.document.is_none());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_context_diagnostics() {
        let tree = EntryTree::default();
        let mut ctx = SchemaContext::new(&tree, ModuleFilter::all(), DocumentMeta::default());

        ctx.add_warning("test", "test warning");
        ctx.add_info("test", "test info");
        assert!(!ctx.has_errors());
        assert_eq!(ctx.warnings().count(), 1);

        ctx.diagnostics
            .push(Diagnostic::error("test", "test error").at("/m:top"));
        assert!(ctx.has_errors());
        assert_eq!(ctx.errors().count(), 1);
    }

    #[test]
    fn test_take_before_phases_run() {
        let tree = EntryTree::default();
        let mut ctx = SchemaContext::new(&tree, ModuleFilter::all(), DocumentMeta::default());

        let err = ctx.take_document().unwrap_err();
        assert!(matches!(*err, Error::PhaseOrder { .. }));
        assert!(ctx.take_indices().is_err());
    }
}
