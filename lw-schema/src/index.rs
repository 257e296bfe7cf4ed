//! Path indices produced by the collector.

use std::collections::BTreeMap;

use leafwise_tree::EntryId;

/// Map from canonical absolute path to entry.
///
/// Paths look like `/openconfig-interfaces:interfaces/interface/config/mtu`:
/// `/`-separated segments, some of them qualified by a module name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathIndex {
    entries: BTreeMap<String, EntryId>,
}

/// The subset of a [`PathIndex`] that holds configuration (non read-only) entries.
pub type ConfigIndex = PathIndex;

impl PathIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, id: EntryId) -> Option<EntryId> {
        self.entries.insert(path.into(), id)
    }

    pub fn get(&self, path: &str) -> Option<EntryId> {
        self.entries.get(path).copied()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(path, entry)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, EntryId)> {
        self.entries.iter().map(|(path, id)| (path.as_str(), *id))
    }

    /// Iterate over paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, EntryId)> for PathIndex {
    fn from_iter<I: IntoIterator<Item = (String, EntryId)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Both indices built by one collector pass.
#[derive(Debug, Clone, Default)]
pub struct PathIndices {
    /// Every node, read-only ones included.
    pub all: PathIndex,
    /// Configuration nodes only.
    pub config: ConfigIndex,
}

/// Split a path into its non-empty segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
