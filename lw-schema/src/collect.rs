//! Path collection over the entry tree.
//!
//! Every node gets a canonical absolute path. A segment is written as
//! `module:name` when
//!
//! - it is a top-level node of a module,
//! - its module differs from its parent's module, or
//! - its parent is augmented by the node's own module,
//!
//! and as the bare `name` otherwise. Distinct modules may define siblings with
//! the same local name; the qualifier keeps such paths apart while leaving
//! single-module subtrees terse.

use leafwise_tree::{Entry, EntryId, EntryTree};

use crate::{ModuleFilter, PathIndices};

/// Collect paths for every module the filter includes.
pub fn collect(tree: &EntryTree, filter: &ModuleFilter) -> PathIndices {
    let mut collector = PathCollector::new(tree);
    for module in tree.modules() {
        if filter.includes(&module.name) {
            collector.collect_module(module.root);
        }
    }
    collector.finish()
}

/// Walks module roots and records the path of every node below them.
pub struct PathCollector<'a> {
    tree: &'a EntryTree,
    indices: PathIndices,
}

impl<'a> PathCollector<'a> {
    pub fn new(tree: &'a EntryTree) -> Self {
        Self {
            tree,
            indices: PathIndices::default(),
        }
    }

    /// Record every node below a module root.
    pub fn collect_module(&mut self, root: EntryId) {
        self.walk(root, "", true);
    }

    pub fn finish(self) -> PathIndices {
        self.indices
    }

    fn walk(&mut self, parent: EntryId, parent_path: &str, top_level: bool) {
        let tree = self.tree;
        let parent_entry = &tree[parent];

        for (name, &child) in parent_entry.children() {
            let entry = &tree[child];
            let path = if qualifies(parent_entry, entry, top_level) {
                format!("{}/{}:{}", parent_path, entry.module(), name)
            } else {
                format!("{}/{}", parent_path, name)
            };

            if !entry.is_read_only() {
                self.indices.config.insert(path.clone(), child);
            }
            self.indices.all.insert(path.clone(), child);

            if entry.has_children() {
                self.walk(child, &path, false);
            }
        }
    }
}

/// Whether a node's segment carries its module qualifier.
fn qualifies(parent: &Entry, entry: &Entry, top_level: bool) -> bool {
    top_level
        || parent.module() != entry.module()
        || parent.augmented_by().iter().any(|m| m == entry.module())
}
