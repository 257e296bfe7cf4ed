//! Deserialization types for module files.

use std::collections::BTreeMap;

use leafwise_core::{NodeKind, TypeKind};
use serde::Deserialize;
use toml::Spanned;

/// Root of a module file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleFile {
    /// Module metadata
    pub module: ModuleHeader,

    /// Identities defined by this module
    #[serde(default, rename = "identity")]
    pub identities: Vec<IdentityDef>,

    /// Top-level schema nodes
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeDef>,

    /// Children injected into nodes of this or other modules
    #[serde(default, rename = "augment")]
    pub augments: Vec<AugmentDef>,
}

/// The `[module]` table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleHeader {
    pub name: Spanned<String>,
    pub prefix: Spanned<String>,
    pub namespace: Option<String>,
    pub description: Option<String>,
}

/// An `[[identity]]` entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityDef {
    pub name: String,
    /// Qualified base identity (`prefix:name`); unqualified names refer to this module
    pub base: Option<Spanned<String>>,
    pub description: Option<String>,
}

/// A schema node definition
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDef {
    pub kind: NodeKind,

    pub description: Option<String>,

    /// Type of a leaf or leaf-list
    #[serde(rename = "type")]
    pub ty: Option<TypeDef>,

    /// `false` marks operational state; inherited by all descendants
    pub config: Option<bool>,

    /// Key leaf names of a list
    #[serde(default)]
    pub key: Vec<String>,

    #[serde(default)]
    pub children: BTreeMap<String, NodeDef>,
}

/// A leaf type, written either as a bare name or as a table
///
/// - `type = "string"`
/// - `type = { kind = "leafref", path = "../config/name" }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TypeDef {
    Name(TypeKind),
    Spec(TypeSpec),
}

/// The table form of a leaf type
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeSpec {
    pub kind: TypeKind,
    /// Target of a leafref
    pub path: Option<String>,
    /// Symbolic names of an enumeration
    #[serde(default)]
    pub enums: Vec<String>,
    /// Qualified base identity of an identityref
    pub base: Option<String>,
}

impl TypeDef {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDef::Name(kind) => *kind,
            TypeDef::Spec(spec) => spec.kind,
        }
    }
}

/// An `[[augment]]` entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AugmentDef {
    /// Absolute path of the augmented node
    pub target: Spanned<String>,
    #[serde(default)]
    pub children: BTreeMap<String, NodeDef>,
}
