//! Assembles the schema document from collected paths.

use std::collections::BTreeMap;

use leafwise_core::{NodeKind, TypeKind, local_name};
use leafwise_tree::{EntryId, EntryTree};

use crate::{
    ConfigIndex, DocumentMeta, Error, PathIndex, Result, ScalarType, SchemaDocument, SchemaNode,
    index::segments,
    pipeline::Diagnostic,
    resolve::{resolve_enums, resolve_identities, resolve_ref},
};

/// Phase name used for diagnostics recorded while building.
pub const BUILD_PHASE: &str = "build";

/// Build a schema document from the config paths, discarding warnings.
///
/// # Errors
///
/// Fails on an empty enumeration or a missing path prefix, and with
/// [`Error::ShapeConflict`] for the first property two paths disagree on.
pub fn build(
    tree: &EntryTree,
    config: &ConfigIndex,
    paths: &PathIndex,
    meta: DocumentMeta,
) -> Result<SchemaDocument> {
    let mut document = SchemaDocument::new(meta);
    let mut builder = SchemaBuilder::new(tree, paths);
    builder.build_into(&mut document, config)?;

    if let Some(conflict) = builder.diagnostics().iter().find(|d| d.severity.is_error()) {
        return Err(Box::new(Error::ShapeConflict {
            path: conflict.location.clone().unwrap_or_default(),
            message: conflict.message.clone(),
        }));
    }
    Ok(document)
}

/// Turns config paths into schema nodes.
///
/// Each path is walked from the document root, creating a node for every
/// segment that has none yet and reusing the existing one otherwise, so the
/// order in which paths arrive does not affect the result. A property two
/// paths disagree on keeps its first shape and the disagreement is recorded
/// as an error diagnostic, so every conflict of a run can be reported.
pub struct SchemaBuilder<'a> {
    tree: &'a EntryTree,
    paths: &'a PathIndex,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(tree: &'a EntryTree, paths: &'a PathIndex) -> Self {
        Self {
            tree,
            paths,
            diagnostics: Vec::new(),
        }
    }

    /// Add a node for every path of `config` to `document`.
    pub fn build_into(&mut self, document: &mut SchemaDocument, config: &ConfigIndex) -> Result<()> {
        for path in config.paths() {
            self.insert_path(&mut document.properties, path)?;
        }
        Ok(())
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn insert_path(
        &mut self,
        properties: &mut BTreeMap<String, SchemaNode>,
        path: &str,
    ) -> Result<()> {
        let tree = self.tree;
        let mut scope = properties;
        let mut prefix = String::with_capacity(path.len());

        for (depth, segment) in segments(path).enumerate() {
            prefix.push('/');
            prefix.push_str(segment);

            let id = self
                .paths
                .get(&prefix)
                .ok_or_else(|| Box::new(Error::MissingEntry { path: prefix.clone() }))?;
            let entry = &tree[id];
            let name = local_name(segment);
            let description = entry.description().unwrap_or_default();

            if depth == 0 && entry.kind() != NodeKind::Container && !scope.contains_key(name) {
                self.diagnostics.push(
                    Diagnostic::warning(
                        BUILD_PHASE,
                        format!("top-level {} '{}' is mapped to an object", entry.kind(), name),
                    )
                    .at(prefix.as_str()),
                );
            }

            if depth == 0 || (entry.kind().is_interior() && !entry.is_list()) {
                let node = scope
                    .entry(name.to_string())
                    .or_insert_with(|| SchemaNode::object(description));
                scope = match node {
                    SchemaNode::Object { properties, .. } => properties,
                    other => {
                        let existing = other.shape();
                        self.conflict(&prefix, name, existing, "object");
                        return Ok(());
                    }
                };
                continue;
            }

            if entry.kind() == NodeKind::List {
                let node = scope
                    .entry(name.to_string())
                    .or_insert_with(|| SchemaNode::array(description, SchemaNode::object("")));
                scope = match node {
                    SchemaNode::Array { items, .. } => match &mut **items {
                        SchemaNode::Object { properties, .. } => properties,
                        _ => {
                            self.conflict(&prefix, name, "array of values", "array of objects");
                            return Ok(());
                        }
                    },
                    other => {
                        let existing = other.shape();
                        self.conflict(&prefix, name, existing, "array");
                        return Ok(());
                    }
                };
                continue;
            }

            // Leaves end the walk; nothing is collected below them.
            let node = self.leaf_node(id, &prefix)?;
            match scope.get(name) {
                Some(existing) if !existing.same_shape(&node) => {
                    let (existing, wanted) = (existing.shape(), node.shape());
                    if existing == wanted {
                        self.conflict(&prefix, name, existing, "a different one");
                    } else {
                        self.conflict(&prefix, name, existing, wanted);
                    }
                }
                Some(_) => {}
                None => {
                    scope.insert(name.to_string(), node);
                }
            }
            break;
        }
        Ok(())
    }

    fn conflict(&mut self, path: &str, name: &str, existing: &str, wanted: &str) {
        let diagnostic = Diagnostic::error(
            BUILD_PHASE,
            format!("property '{}' is already {}, cannot use it as {}", name, existing, wanted),
        )
        .at(path);
        // Paths below a conflicting property hit the same conflict again.
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }

    /// The schema of a leaf or leaf-list.
    ///
    /// Whether the node is wrapped in an array depends on the leaf itself,
    /// never on the target of a leafref.
    fn leaf_node(&mut self, id: EntryId, path: &str) -> Result<SchemaNode> {
        let tree = self.tree;
        let entry = &tree[id];
        let description = entry.description().unwrap_or_default();

        let value = match resolve_ref(tree, id) {
            Some(target) => self.classify(target, description, path)?,
            None => {
                let target = entry
                    .ty()
                    .and_then(|ty| ty.path.as_deref())
                    .unwrap_or_default();
                self.diagnostics.push(
                    Diagnostic::warning(
                        BUILD_PHASE,
                        format!("leafref '{}' does not resolve to a leaf", target),
                    )
                    .at(path),
                );
                SchemaNode::untyped(description)
            }
        };

        Ok(if entry.is_leaf_list() {
            SchemaNode::array(description, value)
        } else {
            value
        })
    }

    fn classify(&mut self, target: EntryId, description: &str, path: &str) -> Result<SchemaNode> {
        let tree = self.tree;
        let Some(kind) = tree[target].type_kind() else {
            self.diagnostics.push(
                Diagnostic::warning(
                    BUILD_PHASE,
                    format!(
                        "leafref points at {} '{}', not a leaf",
                        tree[target].kind(),
                        tree.display_path(target)
                    ),
                )
                .at(path),
            );
            return Ok(SchemaNode::untyped(description));
        };

        if let Some(scalar) = ScalarType::for_kind(kind) {
            return Ok(SchemaNode::scalar(description, scalar));
        }

        let node = match kind {
            TypeKind::Enumeration => {
                SchemaNode::enumerated(description, resolve_enums(tree, target)?)
            }
            TypeKind::Identityref => match resolve_identities(tree, target) {
                Some(values) => SchemaNode::enumerated(description, values),
                None => SchemaNode::untyped(description),
            },
            _ => SchemaNode::untyped(description),
        };
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use leafwise_tree::testing::{entry_at, tree_from};
    use serde_json::json;

    use super::*;
    use crate::{ModuleFilter, collect};

    const SYSTEM: &str = r#"
        [module]
        name = "sys"
        prefix = "sys"

        [[identity]]
        name = "protocol"

        [nodes.system]
        kind = "container"
        description = "System settings"

        [nodes.system.children.hostname]
        kind = "leaf"
        type = "string"
        description = "Host name"

        [nodes.system.children.load]
        kind = "leaf"
        type = "decimal64"

        [nodes.system.children.servers]
        kind = "leaf-list"
        type = "string"

        [nodes.system.children.levels]
        kind = "leaf-list"
        type = { kind = "enumeration", enums = ["LOW", "HIGH"] }

        [nodes.system.children.primary]
        kind = "leaf"
        description = "Preferred server"
        type = { kind = "leafref", path = "../servers" }

        [nodes.system.children.backup]
        kind = "leaf-list"
        type = { kind = "leafref", path = "../hostname" }

        [nodes.system.children.broken]
        kind = "leaf"
        type = { kind = "leafref", path = "../nowhere" }

        [nodes.system.children.blob]
        kind = "leaf"
        type = "binary"

        [nodes.system.children.proto]
        kind = "leaf"
        type = { kind = "identityref", base = "protocol" }

        [nodes.system.children.user]
        kind = "list"
        key = ["name"]

        [nodes.system.children.user.children.name]
        kind = "leaf"
        type = "string"

        [nodes.system.children.user.children.uid]
        kind = "leaf"
        type = "uint32"

        [nodes.system.children.state]
        kind = "container"
        config = false

        [nodes.system.children.state.children.uptime]
        kind = "leaf"
        type = "uint64"
    "#;

    fn build_all(sources: &[&str]) -> (SchemaDocument, Vec<Diagnostic>) {
        let tree = tree_from(sources);
        let indices = collect(&tree, &ModuleFilter::all());
        let mut document = SchemaDocument::default();
        let mut builder = SchemaBuilder::new(&tree, &indices.all);
        builder.build_into(&mut document, &indices.config).unwrap();
        (document, builder.into_diagnostics())
    }

    fn json_at(document: &SchemaDocument, path: &str) -> serde_json::Value {
        serde_json::to_value(document.lookup(path).unwrap()).unwrap()
    }

    #[test]
    fn test_top_level_is_object_named_by_local_name() {
        let (document, _) = build_all(&[SYSTEM]);
        let system = document.properties.get("system").unwrap();
        assert_eq!(system.shape(), "object");
        assert_eq!(system.description(), "System settings");
        assert!(!document.properties.contains_key("sys:system"));
    }

    #[test]
    fn test_scalar_leaves() {
        let (document, _) = build_all(&[SYSTEM]);
        assert_eq!(
            json_at(&document, "system/hostname"),
            json!({ "type": "string", "description": "Host name" })
        );
        assert_eq!(
            json_at(&document, "system/load"),
            json!({ "type": "number", "description": "" })
        );
    }

    #[test]
    fn test_list_is_array_of_objects() {
        let (document, _) = build_all(&[SYSTEM]);
        assert_eq!(
            json_at(&document, "system/user"),
            json!({
                "type": "array",
                "description": "",
                "items": {
                    "type": "object",
                    "description": "",
                    "properties": {
                        "name": { "type": "string", "description": "" },
                        "uid": { "type": "integer", "description": "" }
                    }
                }
            })
        );
    }

    #[test]
    fn test_leaf_list_is_array_of_values() {
        let (document, _) = build_all(&[SYSTEM]);
        assert_eq!(
            json_at(&document, "system/servers"),
            json!({
                "type": "array",
                "description": "",
                "items": { "type": "string", "description": "" }
            })
        );
        assert_eq!(
            json_at(&document, "system/levels"),
            json!({
                "type": "array",
                "description": "",
                "items": { "description": "", "enum": ["LOW", "HIGH"] }
            })
        );
    }

    #[test]
    fn test_leafref_to_leaf_list_stays_scalar() {
        let (document, _) = build_all(&[SYSTEM]);
        assert_eq!(
            json_at(&document, "system/primary"),
            json!({ "type": "string", "description": "Preferred server" })
        );
    }

    #[test]
    fn test_leaf_list_of_leafrefs_is_array() {
        let (document, _) = build_all(&[SYSTEM]);
        assert_eq!(
            json_at(&document, "system/backup"),
            json!({
                "type": "array",
                "description": "",
                "items": { "type": "string", "description": "" }
            })
        );
    }

    #[test]
    fn test_unresolved_leafref_is_untyped_with_warning() {
        let (document, diagnostics) = build_all(&[SYSTEM]);
        assert_eq!(json_at(&document, "system/broken"), json!({ "description": "" }));
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::warning(BUILD_PHASE, "leafref '../nowhere' does not resolve to a leaf")
                    .at("/sys:system/broken")
            ]
        );
    }

    #[test]
    fn test_unmapped_types() {
        let (document, _) = build_all(&[SYSTEM]);
        assert_eq!(json_at(&document, "system/blob"), json!({ "description": "" }));
        assert_eq!(
            json_at(&document, "system/proto"),
            json!({ "description": "", "enum": ["n/a"] })
        );
    }

    #[test]
    fn test_state_is_excluded() {
        let (document, _) = build_all(&[SYSTEM]);
        assert!(document.lookup("system/state").is_none());
    }

    #[test]
    fn test_empty_enumeration_fails_build() {
        let src = r#"
            [module]
            name = "m"
            prefix = "m"

            [nodes.top]
            kind = "container"

            [nodes.top.children.mode]
            kind = "leaf"
            type = { kind = "enumeration" }
        "#;
        let tree = tree_from(&[src]);
        let indices = collect(&tree, &ModuleFilter::all());
        let err = build(&tree, &indices.config, &indices.all, DocumentMeta::default()).unwrap_err();
        assert_eq!(err.to_string(), "enumeration at '/m:top/mode' declares no values");
    }

    #[test]
    fn test_top_level_leaf_is_object_with_warning() {
        let src = r#"
            [module]
            name = "flat"
            prefix = "f"

            [nodes.enabled]
            kind = "leaf"
            type = "boolean"
        "#;
        let (document, diagnostics) = build_all(&[src]);
        assert_eq!(document.properties["enabled"].shape(), "object");
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::warning(BUILD_PHASE, "top-level leaf 'enabled' is mapped to an object")
                    .at("/flat:enabled")
            ]
        );
    }

    #[test]
    fn test_missing_prefix_entry() {
        let tree = tree_from(&[SYSTEM]);
        let hostname = entry_at(&tree, "sys", "system/hostname");
        let mut config = ConfigIndex::new();
        config.insert("/sys:system/hostname", hostname);
        let mut paths = PathIndex::new();
        paths.insert("/sys:system/hostname", hostname);

        let err = build(&tree, &config, &paths, DocumentMeta::default()).unwrap_err();
        assert!(matches!(*err, Error::MissingEntry { ref path } if path == "/sys:system"));
    }

    #[test]
    fn test_shape_conflict() {
        let tree = tree_from(&[SYSTEM]);
        let system = entry_at(&tree, "sys", "system");
        let hostname = entry_at(&tree, "sys", "system/hostname");
        let user = entry_at(&tree, "sys", "system/user");

        // Two paths whose last segments share a local name but not a shape
        let mut paths = PathIndex::new();
        paths.insert("/sys:system", system);
        paths.insert("/sys:system/a:entry", hostname);
        paths.insert("/sys:system/b:entry", user);
        let config: ConfigIndex = paths.clone();

        let err = build(&tree, &config, &paths, DocumentMeta::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "property 'entry' is already string, cannot use it as array (at '/sys:system/b:entry')"
        );
    }

    const ALPHA: &str = r#"
        [module]
        name = "alpha-system"
        prefix = "a"

        [nodes.system]
        kind = "container"

        [nodes.system.children.hostname]
        kind = "leaf"
        type = "string"
        description = "Name of the host"

        [nodes.system.children.level]
        kind = "leaf"
        type = "uint8"

        [nodes.system.children.mode]
        kind = "leaf"
        type = { kind = "enumeration", enums = ["FAST", "SLOW"] }
    "#;

    const BETA: &str = r#"
        [module]
        name = "beta-system"
        prefix = "b"

        [nodes.system]
        kind = "container"

        [nodes.system.children.hostname]
        kind = "leaf"
        type = "string"
        description = "Fully qualified host name"

        [nodes.system.children.level]
        kind = "leaf"
        type = "string"

        [nodes.system.children.mode]
        kind = "container"

        [nodes.system.children.mode.children.speed]
        kind = "leaf"
        type = "uint32"
    "#;

    #[test]
    fn test_conflicts_are_recorded_and_first_shape_kept() {
        let (document, diagnostics) = build_all(&[ALPHA, BETA]);

        assert_eq!(
            json_at(&document, "system/hostname"),
            json!({ "type": "string", "description": "Name of the host" })
        );
        assert_eq!(json_at(&document, "system/level")["type"], "integer");
        assert!(document.lookup("system/mode/speed").is_none());
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::error(
                    BUILD_PHASE,
                    "property 'level' is already integer, cannot use it as string"
                )
                .at("/beta-system:system/level"),
                Diagnostic::error(BUILD_PHASE, "property 'mode' is already enum, cannot use it as object")
                    .at("/beta-system:system/mode"),
            ]
        );
    }

    #[test]
    fn test_conflicting_enum_values() {
        let gamma = r#"
            [module]
            name = "gamma-system"
            prefix = "g"

            [nodes.system]
            kind = "container"

            [nodes.system.children.mode]
            kind = "leaf"
            type = { kind = "enumeration", enums = ["ON", "OFF"] }
        "#;
        let (_, diagnostics) = build_all(&[ALPHA, gamma]);
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::error(
                    BUILD_PHASE,
                    "property 'mode' is already enum, cannot use it as a different one"
                )
                .at("/gamma-system:system/mode")
            ]
        );
    }

    #[test]
    fn test_build_is_order_independent() {
        let tree = tree_from(&[SYSTEM]);
        let indices = collect(&tree, &ModuleFilter::all());
        let forward = build(&tree, &indices.config, &indices.all, DocumentMeta::default()).unwrap();

        // Build again one path at a time, longest paths first
        let mut reversed: Vec<(&str, EntryId)> = indices.config.iter().collect();
        reversed.reverse();
        let mut document = SchemaDocument::default();
        let mut builder = SchemaBuilder::new(&tree, &indices.all);
        for (path, id) in reversed {
            let single: ConfigIndex = std::iter::once((path.to_string(), id)).collect();
            builder.build_into(&mut document, &single).unwrap();
        }

        assert_eq!(forward, document);
    }
}
