//! Canonical serialization for dedup keys

use super::types::ProcessedNode;
use serde_json::Value;

/// Serialize a value deterministically and key-order-independently
///
/// Object keys are sorted lexicographically at every nesting level; arrays
/// stay positional. Two structurally identical values always canonicalize to
/// the same string, whatever order their keys arrived in.
pub fn canonicalize(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

/// Canonical fingerprint of a processed sub-schema
pub fn fingerprint(node: &ProcessedNode) -> String {
    canonicalize(&node.to_value())
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                if let Some(child) = map.get(key.as_str()) {
                    write_canonical(child, out);
                }
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
