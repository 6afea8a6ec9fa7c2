//! Depth-bounded extraction walk

use super::canonical::fingerprint;
use super::naming::lower_first;
use super::types::{ExtractionTable, ProcessedNode};
use crate::schema::SchemaNode;
use std::collections::BTreeMap;

/// Subtrees deeper than this stay inline, unprocessed
const MAX_EXTRACTION_DEPTH: usize = 10;

/// Walk a schema tree, extracting nameable sub-schemas into a table
///
/// At each object property the walk decides eligibility: objects with more
/// than one property, arrays of such objects, enumerations, and arrays of
/// enumerations are extracted and replaced with markers; everything else is
/// recursed into without extracting. Extraction is depth-first, so a table
/// entry's stored schema is itself processed and may contain markers.
/// Structurally identical sub-schemas collapse to one entry via the
/// canonical fingerprint, each site contributing its candidate name. Names
/// are assigned once the whole tree has been walked.
pub fn extract_named_schemas(root: &SchemaNode) -> (ProcessedNode, ExtractionTable) {
    let mut table = ExtractionTable::new();
    let processed = extract_node(root, &mut table, 0);
    table.assign_names();
    (processed, table)
}

fn extract_node(node: &SchemaNode, table: &mut ExtractionTable, depth: usize) -> ProcessedNode {
    if depth > MAX_EXTRACTION_DEPTH {
        return ProcessedNode::Leaf(node.clone());
    }

    if node.is_object() {
        if let Some(properties) = node.properties.as_ref() {
            let mut processed_props = BTreeMap::new();
            for (key, prop) in properties {
                processed_props.insert(key.clone(), extract_property(key, prop, table, depth));
            }
            let mut shell = node.clone();
            shell.properties = None;
            return ProcessedNode::Object {
                node: shell,
                properties: processed_props,
            };
        }
    }

    if node.is_array() {
        if let Some(items) = node.items.as_deref() {
            let mut shell = node.clone();
            shell.items = None;
            return ProcessedNode::Array {
                node: shell,
                items: Box::new(extract_node(items, table, depth + 1)),
            };
        }
    }

    ProcessedNode::Leaf(node.clone())
}

fn extract_property(
    key: &str,
    prop: &SchemaNode,
    table: &mut ExtractionTable,
    depth: usize,
) -> ProcessedNode {
    let key_name = lower_first(key);

    if is_nested_object(prop) {
        let processed = extract_node(prop, table, depth + 1);
        let fp = fingerprint(&processed);
        table.record(fp.clone(), processed, format!("{key_name}Schema"));
        return ProcessedNode::Ref(fp);
    }

    if let Some(items) = array_item_object(prop) {
        let item_name = lower_first(singularize(key));
        let processed = extract_node(items, table, depth + 1);
        let fp = fingerprint(&processed);
        table.record(fp.clone(), processed, format!("{item_name}Schema"));
        return ProcessedNode::ArrayOfRef(fp);
    }

    if let Some(items) = array_item_enum(prop) {
        let item_name = lower_first(singularize(key));
        let leaf = ProcessedNode::Leaf(items.clone());
        let fp = fingerprint(&leaf);
        table.record(fp.clone(), leaf, format!("{item_name}EnumSchema"));
        return ProcessedNode::ArrayOfRef(fp);
    }

    if prop.is_enum() {
        let leaf = ProcessedNode::Leaf(prop.clone());
        let fp = fingerprint(&leaf);
        table.record(fp.clone(), leaf, format!("{key_name}EnumSchema"));
        return ProcessedNode::Ref(fp);
    }

    extract_node(prop, table, depth + 1)
}

/// Object with more than one property
fn is_nested_object(node: &SchemaNode) -> bool {
    node.is_object() && node.property_count() > 1
}

/// Array whose item shape is an object with more than one property
fn array_item_object(node: &SchemaNode) -> Option<&SchemaNode> {
    if !node.is_array() {
        return None;
    }
    node.items
        .as_deref()
        .filter(|items| items.is_object() && items.property_count() > 1)
}

/// Array whose item shape is an enumeration
fn array_item_enum(node: &SchemaNode) -> Option<&SchemaNode> {
    if !node.is_array() {
        return None;
    }
    node.items.as_deref().filter(|items| items.is_enum())
}

/// Strip one trailing "s" for array item names: tags -> tag
fn singularize(s: &str) -> &str {
    s.strip_suffix('s').unwrap_or(s)
}
