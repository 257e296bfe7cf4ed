//! Nodes of the output schema.

use std::collections::BTreeMap;

use leafwise_core::TypeKind;
use serde::{Serialize, Serializer, ser::SerializeMap};

/// JSON Schema primitive type of a scalar leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    String,
    Number,
    Integer,
    Boolean,
}

impl ScalarType {
    /// The scalar a built-in leaf type maps to, if it maps to one directly.
    ///
    /// Enumerations, identityrefs and leafrefs need resolution first; the
    /// remaining kinds (`binary`, `bits`, `empty`, `instance-identifier`) have
    /// no scalar counterpart.
    pub fn for_kind(kind: TypeKind) -> Option<Self> {
        match kind {
            k if k.is_float() => Some(Self::Number),
            k if k.is_integer() => Some(Self::Integer),
            TypeKind::String | TypeKind::Union => Some(Self::String),
            TypeKind::Boolean => Some(Self::Boolean),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// A node of the output schema tree.
///
/// Serializes to the JSON Schema fragment for the node. Keys appear in a
/// fixed order (`type`, `format`, `description`, `enum`, `items`,
/// `properties`) and each variant emits only the keys that apply to it.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Object {
        description: String,
        properties: BTreeMap<String, SchemaNode>,
    },
    Array {
        description: String,
        items: Box<SchemaNode>,
    },
    Scalar {
        description: String,
        ty: ScalarType,
        /// JSON Schema `format` keyword, e.g. `date-time`.
        format: Option<String>,
    },
    Enumerated {
        description: String,
        values: Vec<String>,
    },
    /// A leaf whose type could not be classified. Accepts any value.
    Untyped { description: String },
}

impl SchemaNode {
    pub fn object(description: impl Into<String>) -> Self {
        Self::Object {
            description: description.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn array(description: impl Into<String>, items: SchemaNode) -> Self {
        Self::Array {
            description: description.into(),
            items: Box::new(items),
        }
    }

    pub fn scalar(description: impl Into<String>, ty: ScalarType) -> Self {
        Self::Scalar {
            description: description.into(),
            ty,
            format: None,
        }
    }

    pub fn enumerated(description: impl Into<String>, values: Vec<String>) -> Self {
        Self::Enumerated {
            description: description.into(),
            values,
        }
    }

    pub fn untyped(description: impl Into<String>) -> Self {
        Self::Untyped {
            description: description.into(),
        }
    }

    /// A short name for the node's shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Object { .. } => "object",
            Self::Array { .. } => "array",
            Self::Scalar { ty, .. } => ty.as_str(),
            Self::Enumerated { .. } => "enum",
            Self::Untyped { .. } => "untyped",
        }
    }

    /// Whether two nodes accept the same values. Descriptions are ignored.
    pub fn same_shape(&self, other: &SchemaNode) -> bool {
        match (self, other) {
            (Self::Object { properties: a, .. }, Self::Object { properties: b, .. }) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.same_shape(vb))
            }
            (Self::Array { items: a, .. }, Self::Array { items: b, .. }) => a.same_shape(b),
            (
                Self::Scalar { ty: a, format: fa, .. },
                Self::Scalar { ty: b, format: fb, .. },
            ) => a == b && fa == fb,
            (Self::Enumerated { values: a, .. }, Self::Enumerated { values: b, .. }) => a == b,
            (Self::Untyped { .. }, Self::Untyped { .. }) => true,
            _ => false,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Object { description, .. }
            | Self::Array { description, .. }
            | Self::Scalar { description, .. }
            | Self::Enumerated { description, .. }
            | Self::Untyped { description } => description,
        }
    }

    /// Properties of an object node.
    pub fn properties(&self) -> Option<&BTreeMap<String, SchemaNode>> {
        match self {
            Self::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }

    pub fn properties_mut(&mut self) -> Option<&mut BTreeMap<String, SchemaNode>> {
        match self {
            Self::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }

    /// Item schema of an array node.
    pub fn items(&self) -> Option<&SchemaNode> {
        match self {
            Self::Array { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Properties of an array of objects, the shape a list produces.
    pub fn item_properties_mut(&mut self) -> Option<&mut BTreeMap<String, SchemaNode>> {
        match self {
            Self::Array { items, .. } => items.properties_mut(),
            _ => None,
        }
    }

    /// The node at a `/`-separated path of property names below this node.
    ///
    /// Arrays are looked through, so `interfaces/interface/config` walks into
    /// the items of the `interface` array.
    pub fn lookup(&self, path: &str) -> Option<&SchemaNode> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |node, name| {
                let node = match node {
                    Self::Array { items, .. } => &**items,
                    other => other,
                };
                node.properties()?.get(name)
            })
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Self::Object {
                description,
                properties,
            } => {
                map.serialize_entry("type", "object")?;
                map.serialize_entry("description", description)?;
                map.serialize_entry("properties", properties)?;
            }
            Self::Array { description, items } => {
                map.serialize_entry("type", "array")?;
                map.serialize_entry("description", description)?;
                map.serialize_entry("items", items)?;
            }
            Self::Scalar {
                description,
                ty,
                format,
            } => {
                map.serialize_entry("type", ty)?;
                if let Some(format) = format {
                    map.serialize_entry("format", format)?;
                }
                map.serialize_entry("description", description)?;
            }
            Self::Enumerated {
                description,
                values,
            } => {
                map.serialize_entry("description", description)?;
                map.serialize_entry("enum", values)?;
            }
            Self::Untyped { description } => {
                map.serialize_entry("description", description)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_scalar_for_kind() {
        assert_eq!(ScalarType::for_kind(TypeKind::Decimal64), Some(ScalarType::Number));
        assert_eq!(ScalarType::for_kind(TypeKind::Uint16), Some(ScalarType::Integer));
        assert_eq!(ScalarType::for_kind(TypeKind::Int64), Some(ScalarType::Integer));
        assert_eq!(ScalarType::for_kind(TypeKind::Union), Some(ScalarType::String));
        assert_eq!(ScalarType::for_kind(TypeKind::Boolean), Some(ScalarType::Boolean));
        assert_eq!(ScalarType::for_kind(TypeKind::Binary), None);
        assert_eq!(ScalarType::for_kind(TypeKind::Enumeration), None);
        assert_eq!(ScalarType::for_kind(TypeKind::Leafref), None);
    }

    #[test]
    fn test_object_serialization() {
        let mut node = SchemaNode::object("");
        node.properties_mut()
            .unwrap()
            .insert("mtu".into(), SchemaNode::scalar("max size", ScalarType::Integer));

        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "type": "object",
                "description": "",
                "properties": {
                    "mtu": { "type": "integer", "description": "max size" }
                }
            })
        );
    }

    #[test]
    fn test_scalar_format_only_when_set() {
        let plain = SchemaNode::scalar("", ScalarType::String);
        assert_eq!(
            serde_json::to_string(&plain).unwrap(),
            r#"{"type":"string","description":""}"#
        );

        let stamped = SchemaNode::Scalar {
            description: "last change".into(),
            ty: ScalarType::String,
            format: Some("date-time".into()),
        };
        assert_eq!(
            serde_json::to_string(&stamped).unwrap(),
            r#"{"type":"string","format":"date-time","description":"last change"}"#
        );
        assert!(!stamped.same_shape(&plain));
    }

    #[test]
    fn test_same_shape_ignores_descriptions() {
        let a = SchemaNode::array("servers", SchemaNode::scalar("name", ScalarType::String));
        let b = SchemaNode::array("", SchemaNode::scalar("", ScalarType::String));
        assert!(a.same_shape(&b));
        assert_ne!(a, b);

        let low = SchemaNode::enumerated("", vec!["LOW".into()]);
        let high = SchemaNode::enumerated("", vec!["HIGH".into()]);
        assert!(!low.same_shape(&high));
        assert!(!a.same_shape(&SchemaNode::scalar("", ScalarType::String)));
    }

    #[test]
    fn test_enum_has_no_type() {
        let node = SchemaNode::enumerated("state", vec!["UP".into(), "DOWN".into()]);
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({ "description": "state", "enum": ["UP", "DOWN"] })
        );
    }

    #[test]
    fn test_untyped_has_only_description() {
        let node = SchemaNode::untyped("");
        assert_eq!(serde_json::to_value(&node).unwrap(), json!({ "description": "" }));
    }

    #[test]
    fn test_key_order() {
        let node = SchemaNode::array("", SchemaNode::scalar("", ScalarType::String));
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"type":"array","description":"","items":{"type":"string","description":""}}"#
        );
    }

    #[test]
    fn test_lookup_through_arrays() {
        let mut list = SchemaNode::array("", SchemaNode::object(""));
        list.item_properties_mut()
            .unwrap()
            .insert("name".into(), SchemaNode::scalar("", ScalarType::String));
        let mut root = SchemaNode::object("");
        root.properties_mut().unwrap().insert("interface".into(), list);

        assert_eq!(
            root.lookup("interface/name").map(SchemaNode::shape),
            Some("string")
        );
        assert!(root.lookup("interface/missing").is_none());
        assert_eq!(root.lookup(""), Some(&root));
    }
}
