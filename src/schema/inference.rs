//! Schema inference from JSON values

use super::types::{SchemaNode, SchemaType};
use regex::Regex;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Schema inferrer with configuration options
#[derive(Debug, Clone)]
pub struct SchemaInferrer {
    /// Detect date-time and date formats
    detect_datetime: bool,
    /// Detect URI formats
    detect_uri: bool,
    /// Detect email formats
    detect_email: bool,
    /// Detect UUID formats
    detect_uuid: bool,
    /// Maximum depth for nested values
    max_depth: usize,
}

impl Default for SchemaInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaInferrer {
    /// Create a new schema inferrer with default settings
    pub fn new() -> Self {
        Self {
            detect_datetime: true,
            detect_uri: true,
            detect_email: true,
            detect_uuid: true,
            max_depth: 10,
        }
    }

    /// Enable/disable datetime detection
    #[must_use]
    pub fn with_datetime_detection(mut self, enabled: bool) -> Self {
        self.detect_datetime = enabled;
        self
    }

    /// Enable/disable URI detection
    #[must_use]
    pub fn with_uri_detection(mut self, enabled: bool) -> Self {
        self.detect_uri = enabled;
        self
    }

    /// Enable/disable email detection
    #[must_use]
    pub fn with_email_detection(mut self, enabled: bool) -> Self {
        self.detect_email = enabled;
        self
    }

    /// Enable/disable UUID detection
    #[must_use]
    pub fn with_uuid_detection(mut self, enabled: bool) -> Self {
        self.detect_uuid = enabled;
        self
    }

    /// Disable all string format detection
    #[must_use]
    pub fn without_format_detection(self) -> Self {
        self.with_datetime_detection(false)
            .with_uri_detection(false)
            .with_email_detection(false)
            .with_uuid_detection(false)
    }

    /// Set maximum depth for nested values
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Infer a schema node from a JSON value
    ///
    /// Total over all inputs. Arrays take their item shape from the first
    /// element only; an object key is required iff its value is non-null.
    pub fn infer(&self, value: &Value) -> SchemaNode {
        self.infer_node(value, 0)
    }

    fn infer_node(&self, value: &Value, depth: usize) -> SchemaNode {
        if depth >= self.max_depth {
            return SchemaNode::new(SchemaType::Object);
        }

        match value {
            Value::Null => SchemaNode::new(SchemaType::Null),
            Value::Bool(_) => SchemaNode::new(SchemaType::Boolean),
            Value::Number(n) => {
                if is_integral(n) {
                    SchemaNode::new(SchemaType::Integer)
                } else {
                    SchemaNode::new(SchemaType::Number)
                }
            }
            Value::String(s) => self.infer_string(s),
            Value::Array(arr) => match arr.first() {
                Some(first) => SchemaNode::array(self.infer_node(first, depth + 1)),
                // Empty array - unconstrained item shape
                None => SchemaNode::array(SchemaNode::default()),
            },
            Value::Object(map) => {
                let mut properties = BTreeMap::new();
                let mut required = BTreeSet::new();
                for (key, val) in map {
                    properties.insert(key.clone(), self.infer_node(val, depth + 1));
                    if !val.is_null() {
                        required.insert(key.clone());
                    }
                }
                let mut node = SchemaNode::object(properties);
                node.required = required;
                node
            }
        }
    }

    fn infer_string(&self, s: &str) -> SchemaNode {
        let mut node = SchemaNode::new(SchemaType::String);

        if self.detect_datetime && is_datetime(s) {
            node.set_format("date-time");
        } else if self.detect_datetime && is_date(s) {
            node.set_format("date");
        } else if self.detect_uri && is_uri(s) {
            node.set_format("uri");
        } else if self.detect_email && is_email(s) {
            node.set_format("email");
        } else if self.detect_uuid && is_uuid(s) {
            node.set_format("uuid");
        }

        node
    }
}

/// Infer a schema node from a JSON value (convenience function)
pub fn infer_schema(value: &Value) -> SchemaNode {
    SchemaInferrer::new().infer(value)
}

/// Whole numbers map to `integer`, including float-typed ones like 3.0
fn is_integral(n: &serde_json::Number) -> bool {
    if n.is_i64() || n.is_u64() {
        return true;
    }
    n.as_f64().is_some_and(|f| f.fract() == 0.0)
}

// Format detection helpers

/// ISO 8601 datetime: 2024-01-15T10:30:00Z, 2024-01-15 10:30:00
static DATETIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}").unwrap());

/// ISO 8601 date: 2024-01-15
static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// UUID: 8-4-4-4-12 hex digits
static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

fn is_datetime(s: &str) -> bool {
    DATETIME_REGEX.is_match(s)
}

fn is_date(s: &str) -> bool {
    DATE_REGEX.is_match(s)
}

fn is_uri(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

fn is_email(s: &str) -> bool {
    // Simple check - contains @ and .
    s.contains('@') && s.contains('.') && s.len() > 5
}

fn is_uuid(s: &str) -> bool {
    UUID_REGEX.is_match(s)
}
