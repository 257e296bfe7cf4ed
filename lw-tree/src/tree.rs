//! The frozen entry tree produced by [`Modules::process`](crate::Modules::process).

use std::{collections::HashMap, ops::Index};

use indexmap::IndexMap;
use leafwise_core::{local_name, split_qualified};

use crate::{Entry, EntryId, Error, Result};

/// Metadata of a loaded module.
#[derive(Debug, Clone)]
pub struct ModuleInfo {
    pub name: String,
    pub prefix: String,
    pub namespace: Option<String>,
    pub description: Option<String>,
    /// Root entry whose children are the module's top-level nodes.
    pub root: EntryId,
}

/// An arena of entries with one root per module.
///
/// Built once by the loader and never mutated afterwards; everything
/// downstream reads it through shared references.
#[derive(Debug, Default)]
pub struct EntryTree {
    pub(crate) entries: Vec<Entry>,
    pub(crate) modules: IndexMap<String, ModuleInfo>,
    pub(crate) prefixes: HashMap<String, String>,
}

impl EntryTree {
    /// Names of all loaded modules, in load order.
    pub fn list_modules(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Metadata of all loaded modules, in load order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleInfo> {
        self.modules.values()
    }

    /// Root entry of the named module.
    pub fn module_root(&self, name: &str) -> Result<EntryId> {
        self.modules.get(name).map(|m| m.root).ok_or_else(|| {
            let loaded: Vec<&str> = self.list_modules().collect();
            Box::new(Error::ModuleNotFound {
                name: name.to_string(),
                loaded: if loaded.is_empty() {
                    "(none)".to_string()
                } else {
                    loaded.join(", ")
                },
            })
        })
    }

    /// Look up a module by its prefix, falling back to its name.
    pub fn module_by_qualifier(&self, qualifier: &str) -> Option<&ModuleInfo> {
        self.prefixes
            .get(qualifier)
            .and_then(|name| self.modules.get(name))
            .or_else(|| self.modules.get(qualifier))
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.0)
    }

    /// Total number of entries, module roots included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The module root an entry belongs to.
    pub fn root_of(&self, mut id: EntryId) -> EntryId {
        while let Some(parent) = self[id].parent {
            id = parent;
        }
        id
    }

    /// Resolve a path expression relative to `from`.
    ///
    /// Absolute paths (`/oc-if:interfaces/oc-if:interface`) start at the root
    /// of the module named by the first segment's qualifier, or at the root of
    /// `from` when the first segment is unqualified. Relative paths start at
    /// `from` itself, so `..` names its parent. Qualifiers on later segments
    /// are ignored; children are matched by local name.
    ///
    /// Predicates must already be stripped. Returns `None` when any step fails.
    pub fn find(&self, from: EntryId, path: &str) -> Option<EntryId> {
        let path = path.trim();
        let mut current = from;
        let mut segments = path.split('/').map(str::trim).peekable();

        if path.starts_with('/') {
            segments.next();
            let first = segments.peek().copied().unwrap_or("");
            current = match split_qualified(first).0 {
                Some(qualifier) => self.module_by_qualifier(qualifier)?.root,
                None => self.root_of(from),
            };
        }

        for segment in segments {
            match segment {
                "" | "." => {}
                ".." => current = self[current].parent?,
                name => current = *self[current].children.get(local_name(name))?,
            }
        }
        Some(current)
    }

    /// A readable path of an entry, qualified by its module at the top level.
    pub fn display_path(&self, id: EntryId) -> String {
        let mut names = Vec::new();
        let mut current = id;
        while let Some(parent) = self[current].parent {
            names.push(self[current].name.as_str());
            current = parent;
        }
        let module = &self[current].name;
        names.reverse();
        match names.split_first() {
            Some((first, rest)) if rest.is_empty() => format!("/{}:{}", module, first),
            Some((first, rest)) => format!("/{}:{}/{}", module, first, rest.join("/")),
            None => format!("/{}:", module),
        }
    }
}

impl Index<EntryId> for EntryTree {
    type Output = Entry;

    fn index(&self, id: EntryId) -> &Entry {
        &self.entries[id.0]
    }
}

#[cfg(test)]
mod tests {
    use crate::Modules;

    const INTERFACES: &str = r#"
        [module]
        name = "openconfig-interfaces"
        prefix = "oc-if"

        [nodes.interfaces]
        kind = "container"

        [nodes.interfaces.children.interface]
        kind = "list"
        key = ["name"]

        [nodes.interfaces.children.interface.children.name]
        kind = "leaf"
        type = { kind = "leafref", path = "../config/name" }

        [nodes.interfaces.children.interface.children.config]
        kind = "container"

        [nodes.interfaces.children.interface.children.config.children.name]
        kind = "leaf"
        type = "string"
    "#;

    fn tree() -> crate::EntryTree {
        let mut modules = Modules::new();
        modules.read_str(INTERFACES, "interfaces.toml").unwrap();
        modules.process().unwrap()
    }

    #[test]
    fn test_find_relative() {
        let tree = tree();
        let root = tree.module_root("openconfig-interfaces").unwrap();
        let name = tree.find(root, "interfaces/interface/name").unwrap();
        let target = tree.find(name, "../config/name").unwrap();
        assert_eq!(
            tree.display_path(target),
            "/openconfig-interfaces:interfaces/interface/config/name"
        );
    }

    #[test]
    fn test_find_absolute_by_prefix_and_module_name() {
        let tree = tree();
        let root = tree.module_root("openconfig-interfaces").unwrap();
        let leaf = tree.find(root, "interfaces/interface/name").unwrap();

        let by_prefix = tree
            .find(leaf, "/oc-if:interfaces/oc-if:interface/oc-if:config/oc-if:name")
            .unwrap();
        let by_module = tree
            .find(leaf, "/openconfig-interfaces:interfaces/interface/config/name")
            .unwrap();
        let unqualified = tree.find(leaf, "/interfaces/interface/config/name").unwrap();

        assert_eq!(by_prefix, by_module);
        assert_eq!(by_prefix, unqualified);
    }

    #[test]
    fn test_find_missing() {
        let tree = tree();
        let root = tree.module_root("openconfig-interfaces").unwrap();
        assert!(tree.find(root, "interfaces/nope").is_none());
        assert!(tree.find(root, "..").is_none());
        assert!(tree.find(root, "/unknown:interfaces").is_none());
    }

    #[test]
    fn test_module_not_found() {
        let tree = tree();
        let err = tree.module_root("ietf-interfaces").unwrap_err();
        assert!(matches!(*err, crate::Error::ModuleNotFound { .. }));
        assert!(err.to_string().contains("ietf-interfaces"));
    }
}
