//! Primitive type tags carried by leaf type descriptors.

use serde::{Deserialize, Serialize};

/// Built-in type of a leaf or leaf-list.
///
/// This is the resolved base type: typedefs have already been expanded by the
/// time an entry reaches the schema builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    String,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Decimal64,
    Enumeration,
    Identityref,
    Leafref,
    Union,
    Binary,
    Bits,
    Empty,
    InstanceIdentifier,
}

impl TypeKind {
    /// Get the type name as written in module files.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::String => "string",
            TypeKind::Boolean => "boolean",
            TypeKind::Int8 => "int8",
            TypeKind::Int16 => "int16",
            TypeKind::Int32 => "int32",
            TypeKind::Int64 => "int64",
            TypeKind::Uint8 => "uint8",
            TypeKind::Uint16 => "uint16",
            TypeKind::Uint32 => "uint32",
            TypeKind::Uint64 => "uint64",
            TypeKind::Decimal64 => "decimal64",
            TypeKind::Enumeration => "enumeration",
            TypeKind::Identityref => "identityref",
            TypeKind::Leafref => "leafref",
            TypeKind::Union => "union",
            TypeKind::Binary => "binary",
            TypeKind::Bits => "bits",
            TypeKind::Empty => "empty",
            TypeKind::InstanceIdentifier => "instance-identifier",
        }
    }

    /// Returns true for the signed and unsigned integer types.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            TypeKind::Int8
                | TypeKind::Int16
                | TypeKind::Int32
                | TypeKind::Int64
                | TypeKind::Uint8
                | TypeKind::Uint16
                | TypeKind::Uint32
                | TypeKind::Uint64
        )
    }

    /// Returns true for fractional numeric types.
    pub fn is_float(&self) -> bool {
        matches!(self, TypeKind::Decimal64)
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TypeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "string" => TypeKind::String,
            "boolean" => TypeKind::Boolean,
            "int8" => TypeKind::Int8,
            "int16" => TypeKind::Int16,
            "int32" => TypeKind::Int32,
            "int64" => TypeKind::Int64,
            "uint8" => TypeKind::Uint8,
            "uint16" => TypeKind::Uint16,
            "uint32" => TypeKind::Uint32,
            "uint64" => TypeKind::Uint64,
            "decimal64" => TypeKind::Decimal64,
            "enumeration" => TypeKind::Enumeration,
            "identityref" => TypeKind::Identityref,
            "leafref" => TypeKind::Leafref,
            "union" => TypeKind::Union,
            "binary" => TypeKind::Binary,
            "bits" => TypeKind::Bits,
            "empty" => TypeKind::Empty,
            "instance-identifier" => TypeKind::InstanceIdentifier,
            other => return Err(format!("unknown built-in type '{}'", other)),
        };
        Ok(kind)
    }
}
