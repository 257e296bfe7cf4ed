//! Test fixtures for building entry trees from inline module sources.

use crate::{EntryId, EntryTree, Modules};

/// Build an entry tree from module sources, panicking on any error.
pub fn tree_from(sources: &[&str]) -> EntryTree {
    let mut modules = Modules::new();
    for (i, src) in sources.iter().enumerate() {
        if let Err(e) = modules.read_str(src, &format!("fixture{}.toml", i)) {
            panic!("invalid fixture module {}: {:?}", i, miette::Report::new(*e));
        }
    }
    match modules.process() {
        Ok(tree) => tree,
        Err(e) => panic!("fixture modules failed to process: {:?}", miette::Report::new(*e)),
    }
}

/// Look up an entry by module name and a slash-separated path below its root.
pub fn entry_at(tree: &EntryTree, module: &str, path: &str) -> EntryId {
    let root = tree
        .module_root(module)
        .unwrap_or_else(|_| panic!("no module '{}' in fixture", module));
    tree.find(root, path)
        .unwrap_or_else(|| panic!("no entry '{}' in module '{}'", path, module))
}
