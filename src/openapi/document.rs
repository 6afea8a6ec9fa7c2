//! OpenAPI document wrapper and loading

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// A parsed OpenAPI document (version 2 or 3, loosely)
///
/// Wraps the raw JSON object and exposes pointer and path lookups. The
/// document is read-only; resolution never modifies it.
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    root: Value,
}

impl OpenApiDocument {
    /// Wrap an already-parsed document
    pub fn from_value(root: Value) -> Result<Self> {
        if !root.is_object() {
            return Err(Error::invalid_document(
                "document root must be a JSON object",
            ));
        }
        Ok(Self { root })
    }

    /// Parse a document from JSON text
    pub fn from_json_text(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Parse a document from YAML text
    pub fn from_yaml_text(text: &str) -> Result<Self> {
        Self::from_value(serde_yaml::from_str(text)?)
    }

    /// Parse a document from text, sniffing JSON first and falling back to YAML
    pub fn from_text(text: &str) -> Result<Self> {
        match Self::from_json_text(text) {
            Ok(doc) => Ok(doc),
            Err(_) => Self::from_yaml_text(text),
        }
    }

    /// Document root value
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The `paths` map, when present
    pub fn paths(&self) -> Option<&Map<String, Value>> {
        self.root.get("paths")?.as_object()
    }

    /// Walk a `#/`-rooted JSON pointer to its target
    ///
    /// Segments are property names or array indices. Returns `None` for
    /// pointers not rooted at `#/` and for missing targets.
    pub fn resolve_pointer(&self, pointer: &str) -> Option<&Value> {
        let path = pointer.strip_prefix("#/")?;
        let mut current = &self.root;
        for segment in path.split('/') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Declared version string (`openapi` or `swagger` field)
    pub fn version(&self) -> Option<&str> {
        self.root
            .get("openapi")
            .or_else(|| self.root.get("swagger"))?
            .as_str()
    }

    /// Document title from the `info` block
    pub fn title(&self) -> Option<&str> {
        self.root.get("info")?.get("title")?.as_str()
    }
}

/// Check whether a JSON value looks like an OpenAPI document
///
/// A document carries at least one of `paths`, `openapi`, or `swagger` at the
/// top level. Used to accept or reject fetched candidates.
pub fn looks_like_document(value: &Value) -> bool {
    value.as_object().is_some_and(|map| {
        map.contains_key("paths") || map.contains_key("openapi") || map.contains_key("swagger")
    })
}
