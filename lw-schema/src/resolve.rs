//! Resolvers for the three kinds of type indirection.

use std::collections::HashSet;

use leafwise_core::{TypeKind, strip_predicates};
use leafwise_tree::{EntryId, EntryTree};

use crate::{Error, Result};

/// Value listed for an identityref whose base has no derived identities.
pub const NO_IDENTITIES: &str = "n/a";

/// Follow leafref indirection to the entry that carries the concrete type.
///
/// Entries that are not leafrefs resolve to themselves. Each hop strips the
/// predicates from the leafref path and resolves it relative to the current
/// entry. Returns `None` when a hop names nothing or the chain loops.
pub fn resolve_ref(tree: &EntryTree, id: EntryId) -> Option<EntryId> {
    let mut visited = HashSet::new();
    let mut current = id;

    loop {
        let ty = match tree[current].ty() {
            Some(ty) if ty.kind == TypeKind::Leafref => ty,
            _ => return Some(current),
        };
        if !visited.insert(current) {
            return None;
        }

        let path = strip_predicates(ty.path.as_deref()?);
        current = tree.find(current, &path)?;
    }
}

/// Permitted values of an identityref as `module:name` strings.
///
/// Returns `None` when the entry carries no identity base.
pub fn resolve_identities(tree: &EntryTree, id: EntryId) -> Option<Vec<String>> {
    let base = tree[id].ty()?.identity_base.as_ref()?;
    if base.values.is_empty() {
        return Some(vec![NO_IDENTITIES.to_string()]);
    }
    Some(
        base.values
            .iter()
            .map(|v| format!("{}:{}", v.module, v.name))
            .collect(),
    )
}

/// Symbolic names of an enumeration, in declaration order.
pub fn resolve_enums(tree: &EntryTree, id: EntryId) -> Result<Vec<String>> {
    let entry = &tree[id];
    match entry.ty() {
        Some(ty) if ty.kind == TypeKind::Enumeration => {
            if ty.enums.is_empty() {
                return Err(Box::new(Error::EmptyEnumeration {
                    path: tree.display_path(id),
                }));
            }
            Ok(ty.enums.clone())
        }
        other => Err(Box::new(Error::NotAnEnumeration {
            path: tree.display_path(id),
            kind: other
                .map(|ty| ty.kind.to_string())
                .unwrap_or_else(|| entry.kind().to_string()),
        })),
    }
}
