//! Node kinds of the schema tree.

use serde::{Deserialize, Serialize};

/// The structural kind of an entry in the schema tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// The root of a module. Its children are the module's top-level nodes.
    Module,
    /// Groups child nodes into a single object instance.
    Container,
    /// Zero or more keyed instances of its children.
    List,
    /// A single scalar value.
    Leaf,
    /// Zero or more scalar values.
    LeafList,
}

impl NodeKind {
    /// Get the string representation used in module files.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Module => "module",
            NodeKind::Container => "container",
            NodeKind::List => "list",
            NodeKind::Leaf => "leaf",
            NodeKind::LeafList => "leaf-list",
        }
    }

    /// Returns true for leaf and leaf-list nodes.
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeKind::Leaf | NodeKind::LeafList)
    }

    /// Returns true for nodes that may have children.
    pub fn is_interior(&self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_as_str() {
        assert_eq!(NodeKind::Module.as_str(), "module");
        assert_eq!(NodeKind::Container.as_str(), "container");
        assert_eq!(NodeKind::List.as_str(), "list");
        assert_eq!(NodeKind::Leaf.as_str(), "leaf");
        assert_eq!(NodeKind::LeafList.as_str(), "leaf-list");
    }

    #[test]
    fn test_node_kind_terminal() {
        assert!(NodeKind::Leaf.is_terminal());
        assert!(NodeKind::LeafList.is_terminal());
        assert!(NodeKind::Container.is_interior());
        assert!(NodeKind::List.is_interior());
        assert!(NodeKind::Module.is_interior());
    }
}
