//! The top-level schema document.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Error, Result, SchemaNode};

pub const DEFAULT_ID: &str = "https://example.com/person.schema.json";
pub const DEFAULT_SCHEMA: &str = "http://json-schema.org/draft-04/schema#";
pub const DEFAULT_TITLE: &str = "openconfig";
pub const DEFAULT_DESCRIPTION: &str = "ng schema gen";

/// Header fields of a schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    pub id: String,
    pub schema: String,
    pub title: String,
    pub description: String,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID.to_string(),
            schema: DEFAULT_SCHEMA.to_string(),
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

/// A JSON Schema document whose top level is always an object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDocument {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    ty: &'static str,
    pub properties: BTreeMap<String, SchemaNode>,
}

impl SchemaDocument {
    pub fn new(meta: DocumentMeta) -> Self {
        Self {
            id: meta.id,
            schema: meta.schema,
            title: meta.title,
            description: meta.description,
            ty: "object",
            properties: BTreeMap::new(),
        }
    }

    /// The node at a `/`-separated path of property names, looking through arrays.
    pub fn lookup(&self, path: &str) -> Option<&SchemaNode> {
        let mut names = path.split('/').filter(|s| !s.is_empty());
        let first = self.properties.get(names.next()?)?;
        let rest: Vec<&str> = names.collect();
        first.lookup(&rest.join("/"))
    }

    /// Number of properties in the document, nested ones included.
    ///
    /// The item schema of an array is not a property of its own.
    pub fn node_count(&self) -> usize {
        fn count(node: &SchemaNode) -> usize {
            let nested = match node {
                SchemaNode::Object { properties, .. } => properties.values().map(count).sum(),
                SchemaNode::Array { items, .. } => items
                    .properties()
                    .map_or(0, |properties| properties.values().map(count).sum()),
                _ => 0,
            };
            1 + nested
        }
        self.properties.values().map(count).sum()
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).map_err(|e| Box::new(Error::from(e)))?;
        json.push('\n');
        Ok(json)
    }
}

impl Default for SchemaDocument {
    fn default() -> Self {
        Self::new(DocumentMeta::default())
    }
}
