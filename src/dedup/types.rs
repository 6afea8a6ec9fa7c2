//! Extraction table and processed-tree types

use crate::schema::SchemaNode;
use indexmap::{IndexMap, IndexSet};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use super::naming::name_from_candidates;

/// A schema tree with extracted sub-schemas replaced by markers
///
/// The walk produces this explicit shape instead of mutating the input tree:
/// extraction sites become [`Ref`](ProcessedNode::Ref) or
/// [`ArrayOfRef`](ProcessedNode::ArrayOfRef) markers carrying the target
/// fingerprint, and subtrees the walk did not touch stay inline as leaves.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessedNode {
    /// Subtree kept inline, unprocessed
    Leaf(SchemaNode),
    /// Object whose properties were individually processed; `node` carries
    /// the object-level keywords with `properties` cleared
    Object {
        node: SchemaNode,
        properties: BTreeMap<String, ProcessedNode>,
    },
    /// Array whose item shape was processed; `node` carries the array-level
    /// keywords with `items` cleared
    Array {
        node: SchemaNode,
        items: Box<ProcessedNode>,
    },
    /// Extracted sub-schema site
    Ref(String),
    /// Array of an extracted item shape
    ArrayOfRef(String),
}

impl ProcessedNode {
    /// Render the processed tree back to a JSON value
    ///
    /// Markers serialize as `{"$refHash": fp}` and
    /// `{"type": "array", "$refItemsHash": fp}`; this value form is what the
    /// canonical fingerprint is computed over.
    pub fn to_value(&self) -> Value {
        match self {
            ProcessedNode::Leaf(node) => node.to_value(),
            ProcessedNode::Object { node, properties } => {
                let mut value = node.to_value();
                if let Value::Object(map) = &mut value {
                    let props: serde_json::Map<String, Value> = properties
                        .iter()
                        .map(|(key, child)| (key.clone(), child.to_value()))
                        .collect();
                    map.insert("properties".to_string(), Value::Object(props));
                }
                value
            }
            ProcessedNode::Array { node, items } => {
                let mut value = node.to_value();
                if let Value::Object(map) = &mut value {
                    map.insert("items".to_string(), items.to_value());
                }
                value
            }
            ProcessedNode::Ref(fingerprint) => json!({"$refHash": fingerprint}),
            ProcessedNode::ArrayOfRef(fingerprint) => {
                json!({"type": "array", "$refItemsHash": fingerprint})
            }
        }
    }
}

/// One extracted sub-schema
#[derive(Debug, Clone)]
pub struct ExtractedEntry {
    /// The processed sub-schema; may itself contain markers
    pub schema: ProcessedNode,
    /// Candidate names from every site that referenced this shape,
    /// in encounter order
    pub candidates: IndexSet<String>,
    /// Name assigned after the walk
    pub name: Option<String>,
}

/// Per-conversion table of extracted sub-schemas keyed by canonical fingerprint
///
/// Insertion-ordered, so emitted declarations follow first-encounter order.
/// Built fresh for every conversion and discarded after emission.
#[derive(Debug, Clone, Default)]
pub struct ExtractionTable {
    entries: IndexMap<String, ExtractedEntry>,
}

impl ExtractionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an extraction site
    ///
    /// The first site for a fingerprint stores the schema; every site adds
    /// its candidate name.
    pub fn record(&mut self, fingerprint: String, schema: ProcessedNode, candidate: String) {
        self.entries
            .entry(fingerprint)
            .or_insert_with(|| ExtractedEntry {
                schema,
                candidates: IndexSet::new(),
                name: None,
            })
            .candidates
            .insert(candidate);
    }

    /// Assign a final name to every entry from its candidates
    pub fn assign_names(&mut self) {
        for entry in self.entries.values_mut() {
            entry.name = Some(name_from_candidates(&entry.candidates));
        }
    }

    /// Assigned name for a fingerprint
    pub fn name_for(&self, fingerprint: &str) -> Option<&str> {
        self.entries.get(fingerprint)?.name.as_deref()
    }

    /// Entry for a fingerprint
    pub fn get(&self, fingerprint: &str) -> Option<&ExtractedEntry> {
        self.entries.get(fingerprint)
    }

    /// Iterate entries in first-encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtractedEntry)> {
        self.entries.iter().map(|(fp, entry)| (fp.as_str(), entry))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
