//! Presentation-hint merge
//!
//! Inference marks every non-null field required, but the rendered view often
//! knows better. A [`PresentationHints`] capability supplies per-field
//! judgments without the core ever seeing markup; [`apply_hints`] folds those
//! judgments into a schema node by demoting fields from `required`.

use crate::error::Result;
use crate::schema::SchemaNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Judgment about one field's optionality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRequirement {
    /// The view marks the field required; confirms inference, never promotes
    Required,
    /// The view marks the field optional; the field is demoted from required
    Optional,
}

/// Capability answering "is this field required at this schema path"
///
/// Paths are dotted property chains from the root (`""` at the root,
/// `"user.address"` two levels down); an array item shape appends `[]` to the
/// owning segment (`"tags[]"`). Implementations return `None` when they have
/// no information about a field.
pub trait PresentationHints: Send + Sync {
    /// Judge one (schema-path, field) pair
    fn judge(&self, path: &str, field: &str) -> Option<FieldRequirement>;
}

/// Hints source with no information; leaves every schema unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHints;

impl PresentationHints for NoHints {
    fn judge(&self, _path: &str, _field: &str) -> Option<FieldRequirement> {
        None
    }
}

/// Map-backed hints keyed by dotted field path
#[derive(Debug, Clone, Default)]
pub struct StaticHints {
    fields: BTreeMap<String, FieldRequirement>,
}

impl StaticHints {
    /// Create an empty hints map
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a dotted field path optional
    #[must_use]
    pub fn mark_optional(mut self, path: &str) -> Self {
        self.fields
            .insert(path.to_string(), FieldRequirement::Optional);
        self
    }

    /// Mark a dotted field path required
    #[must_use]
    pub fn mark_required(mut self, path: &str) -> Self {
        self.fields
            .insert(path.to_string(), FieldRequirement::Required);
        self
    }

    /// Load hints from a JSON object of `path -> "required" | "optional"`
    pub fn from_value(value: &Value) -> Result<Self> {
        let fields: BTreeMap<String, FieldRequirement> = serde_json::from_value(value.clone())?;
        Ok(Self { fields })
    }

    /// Number of judged paths
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no paths are judged
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PresentationHints for StaticHints {
    fn judge(&self, path: &str, field: &str) -> Option<FieldRequirement> {
        self.fields.get(&join_path(path, field)).copied()
    }
}

/// Demote fields judged optional from `required`
///
/// Recurses into nested object properties and into array item shapes that are
/// objects, threading the dotted schema path. Fields without a judgment keep
/// their inferred state.
pub fn apply_hints(node: &mut SchemaNode, hints: &dyn PresentationHints) {
    apply_at_path(node, hints, "");
}

fn apply_at_path(node: &mut SchemaNode, hints: &dyn PresentationHints, path: &str) {
    let SchemaNode {
        properties,
        required,
        ..
    } = node;
    let Some(properties) = properties.as_mut() else {
        return;
    };

    for (field, child) in properties.iter_mut() {
        if hints.judge(path, field) == Some(FieldRequirement::Optional) {
            required.remove(field);
        }

        let child_path = join_path(path, field);
        if child.is_object() {
            apply_at_path(child, hints, &child_path);
        } else if child.is_array() {
            if let Some(items) = child.items.as_deref_mut() {
                if items.is_object() {
                    apply_at_path(items, hints, &format!("{child_path}[]"));
                }
            }
        }
    }
}

fn join_path(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}
