//! Module registry: loads module files and freezes them into an [`EntryTree`].

use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use indexmap::IndexMap;
use leafwise_core::{NodeKind, TypeKind, split_qualified};
use miette::SourceSpan;

use crate::{
    Entry, EntryId, EntryTree, Error, Identity, IdentityBase, Result, TypeDesc,
    error::SourceContext,
    source::{AugmentDef, ModuleFile, NodeDef, TypeDef},
    tree::ModuleInfo,
};

struct LoadedModule {
    file: ModuleFile,
    ctx: SourceContext,
}

impl LoadedModule {
    fn name(&self) -> &str {
        self.file.module.name.get_ref()
    }

    fn prefix(&self) -> &str {
        self.file.module.prefix.get_ref()
    }
}

/// A set of parsed module files.
///
/// Files are read one at a time with [`read`](Self::read) or
/// [`read_str`](Self::read_str); [`process`](Self::process) then resolves
/// identities and augments across all of them and produces the entry tree.
#[derive(Default)]
pub struct Modules {
    loaded: IndexMap<String, LoadedModule>,
}

impl Modules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a module file from the given path.
    pub fn read(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        self.read_str(&content, &path.display().to_string())
    }

    /// Parse a module from a string, using `filename` for error reporting.
    pub fn read_str(&mut self, content: &str, filename: &str) -> Result<()> {
        let ctx = SourceContext::new(content, filename);
        let file: ModuleFile = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        let module = LoadedModule { file, ctx };

        if let Some(first) = self.loaded.get(module.name()) {
            return Err(Box::new(Error::DuplicateModule {
                src: module.ctx.named_source(),
                span: Some(module.file.module.name.span().into()),
                name: module.name().to_string(),
                first: first.ctx.filename().to_string(),
            }));
        }

        if let Some(first) = self.loaded.values().find(|m| m.prefix() == module.prefix()) {
            return Err(Box::new(Error::DuplicatePrefix {
                src: module.ctx.named_source(),
                span: Some(module.file.module.prefix.span().into()),
                prefix: module.prefix().to_string(),
                first: first.name().to_string(),
                second: module.name().to_string(),
            }));
        }

        self.loaded.insert(module.name().to_string(), module);
        Ok(())
    }

    /// Names of the modules read so far.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.loaded.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Resolve identities and augments and build the entry tree.
    pub fn process(&self) -> Result<EntryTree> {
        let qualifiers = self.qualifiers();
        let identities = IdentityTable::new(self, &qualifiers)?;
        let mut builder = TreeBuilder {
            tree: EntryTree::default(),
            identities,
            qualifiers,
        };

        for module in self.loaded.values() {
            builder.add_module(module)?;
        }
        builder.apply_augments(self)?;

        Ok(builder.tree)
    }

    /// Map of every prefix and module name to the module name it designates.
    fn qualifiers(&self) -> HashMap<String, String> {
        let mut qualifiers = HashMap::new();
        for module in self.loaded.values() {
            qualifiers.insert(module.name().to_string(), module.name().to_string());
        }
        // Prefixes win over module names when both spell the same word
        for module in self.loaded.values() {
            qualifiers.insert(module.prefix().to_string(), module.name().to_string());
        }
        qualifiers
    }
}

/// Resolve a possibly qualified name to `(module, local name)`.
fn qualify(
    qualifiers: &HashMap<String, String>,
    ctx: &SourceContext,
    module: &str,
    qualified: &str,
    context: &str,
    span: Option<SourceSpan>,
) -> Result<Identity> {
    let (qualifier, name) = split_qualified(qualified);
    let module = match qualifier {
        None => module.to_string(),
        Some(q) => qualifiers
            .get(q)
            .cloned()
            .ok_or_else(|| ctx.unknown_qualifier_error(q, context, span))?,
    };
    Ok(Identity {
        module,
        name: name.to_string(),
    })
}

/// Every identity of every module, with its base.
struct IdentityTable {
    bases: BTreeMap<Identity, Option<Identity>>,
}

impl IdentityTable {
    fn new(modules: &Modules, qualifiers: &HashMap<String, String>) -> Result<Self> {
        let mut bases = BTreeMap::new();
        let mut pending = Vec::new();

        for module in modules.loaded.values() {
            for def in &module.file.identities {
                let id = Identity {
                    module: module.name().to_string(),
                    name: def.name.clone(),
                };
                let base = match &def.base {
                    Some(base) => {
                        let span = Some(SourceSpan::from(base.span()));
                        let resolved = qualify(
                            qualifiers,
                            &module.ctx,
                            module.name(),
                            base.get_ref(),
                            "identity base",
                            span,
                        )?;
                        pending.push((resolved.clone(), &module.ctx, span));
                        Some(resolved)
                    }
                    None => None,
                };
                bases.insert(id, base);
            }
        }

        for (base, ctx, span) in pending {
            if !bases.contains_key(&base) {
                return Err(ctx.unknown_identity_error(
                    format!("{}:{}", base.module, base.name),
                    span,
                ));
            }
        }

        Ok(Self { bases })
    }

    /// All identities deriving from `base`, directly or transitively.
    fn derived(&self, base: &Identity) -> Vec<Identity> {
        self.bases
            .keys()
            .filter(|id| self.derives_from(id, base))
            .cloned()
            .collect()
    }

    fn derives_from(&self, id: &Identity, base: &Identity) -> bool {
        let mut current = self.bases.get(id).and_then(Option::as_ref);
        // A chain can never be longer than the table without looping
        for _ in 0..self.bases.len() {
            match current {
                Some(b) if b == base => return true,
                Some(b) => current = self.bases.get(b).and_then(Option::as_ref),
                None => return false,
            }
        }
        false
    }
}

struct TreeBuilder {
    tree: EntryTree,
    identities: IdentityTable,
    qualifiers: HashMap<String, String>,
}

impl TreeBuilder {
    fn push(&mut self, entry: Entry) -> EntryId {
        let id = EntryId(self.tree.entries.len());
        self.tree.entries.push(entry);
        id
    }

    fn add_module(&mut self, module: &LoadedModule) -> Result<()> {
        let name = module.name().to_string();
        let header = &module.file.module;
        let root = self.push(Entry {
            name: name.clone(),
            kind: NodeKind::Module,
            module: name.clone(),
            description: header.description.clone(),
            parent: None,
            children: BTreeMap::new(),
            ty: None,
            read_only: false,
            key: Vec::new(),
            augmented_by: Vec::new(),
        });

        self.tree
            .prefixes
            .insert(module.prefix().to_string(), name.clone());
        self.tree.modules.insert(
            name.clone(),
            ModuleInfo {
                name: name.clone(),
                prefix: module.prefix().to_string(),
                namespace: header.namespace.clone(),
                description: header.description.clone(),
                root,
            },
        );

        for (child, def) in &module.file.nodes {
            self.add_node(&module.ctx, &name, root, child, def, false)?;
        }
        Ok(())
    }

    fn add_node(
        &mut self,
        ctx: &SourceContext,
        module: &str,
        parent: EntryId,
        name: &str,
        def: &NodeDef,
        inherited_read_only: bool,
    ) -> Result<EntryId> {
        if def.kind == NodeKind::Module {
            return Err(ctx.validation_error(
                format!("'{}' cannot have kind 'module'", name),
                name,
            ));
        }

        let ty = match (&def.ty, def.kind.is_terminal()) {
            (Some(ty), true) => Some(self.resolve_type(ctx, module, name, ty)?),
            (None, true) => {
                return Err(ctx.validation_error(
                    format!("{} '{}' has no type", def.kind, name),
                    name,
                ));
            }
            (Some(_), false) => {
                return Err(ctx.validation_error(
                    format!("{} '{}' cannot have a type", def.kind, name),
                    name,
                ));
            }
            (None, false) => None,
        };

        if def.kind.is_terminal() && !def.children.is_empty() {
            return Err(ctx.validation_error(
                format!("{} '{}' cannot have children", def.kind, name),
                name,
            ));
        }

        if def.kind != NodeKind::List && !def.key.is_empty() {
            return Err(ctx.validation_error(
                format!("{} '{}' cannot have a key, only lists do", def.kind, name),
                name,
            ));
        }

        for key in &def.key {
            if !def.children.contains_key(key) {
                return Err(ctx.validation_error(
                    format!("key '{}' of list '{}' is not one of its children", key, name),
                    name,
                ));
            }
        }

        if self.tree[parent].children.contains_key(name) {
            return Err(ctx.validation_error(
                format!(
                    "'{}' is already defined in '{}'",
                    name,
                    self.tree.display_path(parent)
                ),
                name,
            ));
        }

        let read_only = inherited_read_only || def.config == Some(false);
        let id = self.push(Entry {
            name: name.to_string(),
            kind: def.kind,
            module: module.to_string(),
            description: def.description.clone(),
            parent: Some(parent),
            children: BTreeMap::new(),
            ty,
            read_only,
            key: def.key.clone(),
            augmented_by: Vec::new(),
        });
        self.tree.entries[parent.0]
            .children
            .insert(name.to_string(), id);

        for (child, child_def) in &def.children {
            self.add_node(ctx, module, id, child, child_def, read_only)?;
        }
        Ok(id)
    }

    fn resolve_type(
        &self,
        ctx: &SourceContext,
        module: &str,
        name: &str,
        ty: &TypeDef,
    ) -> Result<TypeDesc> {
        let mut desc = TypeDesc::new(ty.kind());

        if let TypeDef::Spec(spec) = ty {
            desc.path = spec.path.clone();
            desc.enums = spec.enums.clone();

            if let (TypeKind::Identityref, Some(base)) = (spec.kind, &spec.base) {
                let span = ctx.find_span(base);
                let base = qualify(
                    &self.qualifiers,
                    ctx,
                    module,
                    base,
                    "identityref base",
                    span,
                )?;
                if !self.identities.bases.contains_key(&base) {
                    return Err(ctx.unknown_identity_error(
                        format!("{}:{}", base.module, base.name),
                        span,
                    ));
                }
                desc.identity_base = Some(IdentityBase {
                    values: self.identities.derived(&base),
                    name: base.name,
                    module: base.module,
                });
            }
        }

        if desc.kind == TypeKind::Leafref && desc.path.is_none() {
            return Err(ctx.validation_error(format!("leafref '{}' has no path", name), name));
        }

        Ok(desc)
    }

    /// Graft augment children onto their targets.
    ///
    /// A target may itself be added by another augment, so unresolved augments
    /// are retried until a round makes no progress.
    fn apply_augments(&mut self, modules: &Modules) -> Result<()> {
        let mut pending: Vec<(&LoadedModule, &AugmentDef)> = modules
            .loaded
            .values()
            .flat_map(|m| m.file.augments.iter().map(move |a| (m, a)))
            .collect();

        while !pending.is_empty() {
            let before = pending.len();
            let mut unresolved = Vec::new();

            for (module, augment) in pending {
                let from = self.tree.modules[module.name()].root;
                let target = augment.target.get_ref();
                let found = if target.starts_with('/') {
                    self.tree.find(from, target)
                } else {
                    None
                };

                match found {
                    Some(id) if self.tree[id].kind.is_interior() => {
                        self.graft(module, id, augment)?;
                    }
                    Some(id) => {
                        return Err(module.ctx.validation_error(
                            format!(
                                "augment target '{}' is a {}, not a container or list",
                                target, self.tree[id].kind
                            ),
                            target,
                        ));
                    }
                    None => unresolved.push((module, augment)),
                }
            }

            if unresolved.len() == before {
                let (module, augment) = unresolved[0];
                return Err(module.ctx.unresolved_augment_error(
                    augment.target.get_ref().as_str(),
                    augment.target.span(),
                ));
            }
            pending = unresolved;
        }
        Ok(())
    }

    fn graft(&mut self, module: &LoadedModule, target: EntryId, augment: &AugmentDef) -> Result<()> {
        let read_only = self.tree[target].read_only;
        for (child, def) in &augment.children {
            self.add_node(&module.ctx, module.name(), target, child, def, read_only)?;
        }

        let augmented_by = &mut self.tree.entries[target.0].augmented_by;
        if !augmented_by.iter().any(|m| m == module.name()) {
            augmented_by.push(module.name().to_string());
        }
        Ok(())
    }
}
