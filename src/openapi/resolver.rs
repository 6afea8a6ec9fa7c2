//! `$ref` pointer resolution

use super::document::OpenApiDocument;
use serde_json::Value;
use std::collections::HashSet;

/// Resolve every `#/`-rooted `$ref` in `schema` against `doc`
///
/// Returns a new value; the document is never modified. One visited-pointer
/// set spans the whole call: a pointer encountered a second time is left
/// unexpanded, so cyclic documents terminate with the inner `$ref` in place.
/// Pointers that are not `#/`-rooted, have no target, or point at a scalar
/// are also left in place while the rest of the tree still resolves.
pub fn resolve_refs(schema: &Value, doc: &OpenApiDocument) -> Value {
    let mut visited = HashSet::new();
    resolve_recursive(schema.clone(), doc, &mut visited)
}

fn resolve_recursive(value: Value, doc: &OpenApiDocument, visited: &mut HashSet<String>) -> Value {
    match value {
        Value::Object(mut map) => {
            if let Some(pointer) = map.get("$ref").and_then(Value::as_str).map(str::to_string) {
                if visited.insert(pointer.clone()) {
                    if let Some(target) = schema_target(doc, &pointer) {
                        return resolve_recursive(target.clone(), doc, visited);
                    }
                    // No usable target - keep the pointer, still walk siblings
                } else {
                    return Value::Object(map);
                }
            }
            for (_, child) in map.iter_mut() {
                let owned = std::mem::take(child);
                *child = resolve_recursive(owned, doc, visited);
            }
            Value::Object(map)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| resolve_recursive(item, doc, visited))
                .collect(),
        ),
        other => other,
    }
}

/// Resolve a single `$ref` indirection
///
/// Returns the node itself when it carries no `$ref` or the target is
/// unusable. Request-body and parameter objects use this before inspecting
/// their fields.
pub(crate) fn deref_once<'a>(node: &'a Value, doc: &'a OpenApiDocument) -> &'a Value {
    let Some(pointer) = node.get("$ref").and_then(Value::as_str) else {
        return node;
    };
    schema_target(doc, pointer).unwrap_or(node)
}

/// Pointer target usable as a schema: objects and arrays only
fn schema_target<'a>(doc: &'a OpenApiDocument, pointer: &str) -> Option<&'a Value> {
    doc.resolve_pointer(pointer)
        .filter(|target| target.is_object() || target.is_array())
}
