//! Entries of the schema tree.

use std::collections::BTreeMap;

use leafwise_core::{NodeKind, TypeKind};

/// Index of an entry inside an [`EntryTree`](crate::EntryTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub(crate) usize);

impl EntryId {
    /// The position of this entry in the tree's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the schema tree.
///
/// Entries are owned by the tree; `parent` and `children` hold arena indices,
/// so the parent link never owns its target.
#[derive(Debug, Clone)]
pub struct Entry {
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) module: String,
    pub(crate) description: Option<String>,
    pub(crate) parent: Option<EntryId>,
    pub(crate) children: BTreeMap<String, EntryId>,
    pub(crate) ty: Option<TypeDesc>,
    pub(crate) read_only: bool,
    pub(crate) key: Vec<String>,
    pub(crate) augmented_by: Vec<String>,
}

impl Entry {
    /// Local name, unique among siblings.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Name of the module that defines this node.
    ///
    /// For nodes grafted by an augment this is the augmenting module, not the
    /// module of the target.
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    /// Children keyed by local name.
    pub fn children(&self) -> &BTreeMap<String, EntryId> {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Type descriptor of a leaf or leaf-list.
    pub fn ty(&self) -> Option<&TypeDesc> {
        self.ty.as_ref()
    }

    /// The built-in type of a leaf or leaf-list.
    pub fn type_kind(&self) -> Option<TypeKind> {
        self.ty.as_ref().map(|t| t.kind)
    }

    /// True for operational state, false for configuration.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Key leaf names of a list, in declaration order.
    pub fn key(&self) -> &[String] {
        &self.key
    }

    /// Modules that inject children into this node through augments.
    pub fn augmented_by(&self) -> &[String] {
        &self.augmented_by
    }

    pub fn is_list(&self) -> bool {
        self.kind == NodeKind::List
    }

    pub fn is_leaf_list(&self) -> bool {
        self.kind == NodeKind::LeafList
    }
}

/// Resolved type of a leaf or leaf-list.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDesc {
    pub kind: TypeKind,
    /// Target path expression of a leafref.
    pub path: Option<String>,
    /// Symbolic names of an enumeration, in declaration order.
    pub enums: Vec<String>,
    /// Base identity of an identityref.
    pub identity_base: Option<IdentityBase>,
}

impl TypeDesc {
    /// A type descriptor without any kind-specific data.
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            path: None,
            enums: Vec::new(),
            identity_base: None,
        }
    }
}

/// The base identity of an identityref, with every identity derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityBase {
    pub name: String,
    pub module: String,
    /// Identities deriving from the base, directly or transitively.
    pub values: Vec<Identity>,
}

/// A single identity value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Identity {
    /// Module that defines the identity.
    pub module: String,
    pub name: String,
}
