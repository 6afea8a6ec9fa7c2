//! Schema node types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// JSON value kind carried by a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Null,
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaType::Null => write!(f, "null"),
            SchemaType::String => write!(f, "string"),
            SchemaType::Number => write!(f, "number"),
            SchemaType::Integer => write!(f, "integer"),
            SchemaType::Boolean => write!(f, "boolean"),
            SchemaType::Object => write!(f, "object"),
            SchemaType::Array => write!(f, "array"),
        }
    }
}

/// One node of a JSON-Schema-like shape description
///
/// Models both inferred shapes and OpenAPI schema fragments. A node is either
/// typed (`kind` present), an unresolved pointer (`reference` present), or
/// unconstrained (both absent). Keywords the generator does not model
/// structurally (`format`, `nullable`, `additionalProperties`, `description`,
/// ...) are retained in `extra` so document fragments survive a
/// parse/serialize round trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Value kind; absent means unconstrained
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SchemaType>,

    /// Object properties (deterministic order)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaNode>>,

    /// Names of required properties
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub required: BTreeSet<String>,

    /// Array element shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    /// Enumeration literals, independent of `kind`
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    /// Unresolved JSON pointer; mutually exclusive with `kind`
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Keywords carried through verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl SchemaNode {
    /// Create a node with the given kind and nothing else
    pub fn new(kind: SchemaType) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Create an object node with the given properties
    pub fn object(properties: BTreeMap<String, SchemaNode>) -> Self {
        Self {
            kind: Some(SchemaType::Object),
            properties: Some(properties),
            ..Self::default()
        }
    }

    /// Create an array node with the given item shape
    pub fn array(items: SchemaNode) -> Self {
        Self {
            kind: Some(SchemaType::Array),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    /// Check if this node describes an object
    pub fn is_object(&self) -> bool {
        matches!(self.kind, Some(SchemaType::Object))
    }

    /// Check if this node describes an array
    pub fn is_array(&self) -> bool {
        matches!(self.kind, Some(SchemaType::Array))
    }

    /// Check if this node carries an enumeration
    pub fn is_enum(&self) -> bool {
        self.enum_values.as_ref().is_some_and(|v| !v.is_empty())
    }

    /// Check if this node is an unresolved pointer
    pub fn is_ref(&self) -> bool {
        self.reference.is_some()
    }

    /// Number of declared properties
    pub fn property_count(&self) -> usize {
        self.properties.as_ref().map_or(0, BTreeMap::len)
    }

    /// Get a property
    pub fn get_property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.as_ref()?.get(name)
    }

    /// Get a mutable property
    pub fn get_property_mut(&mut self, name: &str) -> Option<&mut SchemaNode> {
        self.properties.as_mut()?.get_mut(name)
    }

    /// Add a property
    pub fn add_property(&mut self, name: &str, node: SchemaNode) {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), node);
    }

    /// Mark a property as required
    pub fn add_required(&mut self, name: &str) {
        self.required.insert(name.to_string());
    }

    /// Demote a property from required
    pub fn remove_required(&mut self, name: &str) {
        self.required.remove(name);
    }

    /// Check if a property is required
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Format keyword, when present
    pub fn format(&self) -> Option<&str> {
        self.extra.get("format").and_then(Value::as_str)
    }

    /// Set the format keyword
    pub fn set_format(&mut self, format: &str) {
        self.extra
            .insert("format".to_string(), Value::String(format.to_string()));
    }

    /// Check for `nullable: true`
    pub fn is_nullable(&self) -> bool {
        self.extra
            .get("nullable")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Check for `additionalProperties: false`
    pub fn forbids_additional_properties(&self) -> bool {
        self.extra
            .get("additionalProperties")
            .and_then(Value::as_bool)
            .is_some_and(|allowed| !allowed)
    }

    /// Parse a node from a JSON-Schema-like value
    pub fn from_value(value: &Value) -> crate::error::Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Convert to a JSON value
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
