//! Zod declaration emission

use crate::dedup::{ExtractionTable, ProcessedNode};
use crate::schema::{SchemaNode, SchemaType};
use serde_json::Value;

/// Import line prefixed to every emitted source
const IMPORT_LINE: &str = "import { z } from \"zod\";";

/// Emitted declaration source before formatting
#[derive(Debug, Clone)]
pub struct EmittedSource {
    /// Concatenated declaration source, syntactically valid as-is
    pub source: String,
    /// Identifiers bound, in declaration order
    pub declarations: Vec<String>,
}

/// Emits Zod validator declarations from a processed schema tree
///
/// One `export const <name> = <expr>;` per extraction-table entry, then the
/// root under the caller's main name. Reference markers substitute the
/// target identifier; object expressions split required fields from
/// `.optional()` ones. `additionalProperties: false` surfaces as `.strict()`
/// during expression building and a rewrite pass removes every occurrence
/// afterwards, keeping emitted schemas permissive of unknown fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZodEmitter;

impl ZodEmitter {
    /// Create an emitter
    pub fn new() -> Self {
        Self
    }

    /// Emit all declarations for a processed root and its extraction table
    pub fn emit(
        &self,
        root: &ProcessedNode,
        table: &ExtractionTable,
        main_name: &str,
    ) -> EmittedSource {
        let mut parts = vec![IMPORT_LINE.to_string()];
        let mut declarations = Vec::new();

        for (_, entry) in table.iter() {
            let Some(name) = entry.name.as_deref() else {
                continue;
            };
            parts.push(declaration(name, &processed_expression(&entry.schema, table)));
            declarations.push(name.to_string());
        }

        parts.push(declaration(main_name, &processed_expression(root, table)));
        declarations.push(main_name.to_string());

        EmittedSource {
            source: strip_strictness(&parts.join("\n\n")),
            declarations,
        }
    }
}

/// Remove every `.strict()` modifier from emitted source
pub fn strip_strictness(source: &str) -> String {
    source.replace(".strict()", "")
}

fn declaration(name: &str, expression: &str) -> String {
    format!("export const {name} = {expression};")
}

fn processed_expression(node: &ProcessedNode, table: &ExtractionTable) -> String {
    match node {
        ProcessedNode::Leaf(schema) => node_expression(schema),
        ProcessedNode::Ref(fingerprint) => ref_identifier(table, fingerprint),
        ProcessedNode::ArrayOfRef(fingerprint) => {
            format!("z.array({})", ref_identifier(table, fingerprint))
        }
        ProcessedNode::Object { node, properties } => {
            let fields = properties
                .iter()
                .map(|(key, child)| {
                    field_line(key, &processed_expression(child, table), node.is_required(key))
                })
                .collect();
            object_expression(node, fields)
        }
        ProcessedNode::Array { node, items } => {
            let expr = format!("z.array({})", processed_expression(items, table));
            with_nullable(node, expr)
        }
    }
}

/// Convert an inline schema node to a Zod expression
fn node_expression(schema: &SchemaNode) -> String {
    if let Some(values) = schema.enum_values.as_ref().filter(|v| !v.is_empty()) {
        return with_nullable(schema, enum_expression(values));
    }

    if schema.is_ref() {
        // Unresolved pointer - permissive degradation
        return "z.any()".to_string();
    }

    match schema.kind {
        Some(SchemaType::Object) => {
            let fields = schema
                .properties
                .iter()
                .flatten()
                .map(|(key, child)| {
                    field_line(key, &node_expression(child), schema.is_required(key))
                })
                .collect();
            object_expression(schema, fields)
        }
        Some(SchemaType::Array) => {
            let items = schema
                .items
                .as_deref()
                .map_or_else(|| "z.any()".to_string(), node_expression);
            with_nullable(schema, format!("z.array({items})"))
        }
        Some(SchemaType::String) => {
            let refinement = string_refinement(schema.format());
            with_nullable(schema, format!("z.string(){refinement}"))
        }
        Some(SchemaType::Integer) => with_nullable(schema, "z.number().int()".to_string()),
        Some(SchemaType::Number) => with_nullable(schema, "z.number()".to_string()),
        Some(SchemaType::Boolean) => with_nullable(schema, "z.boolean()".to_string()),
        Some(SchemaType::Null) => "z.null()".to_string(),
        None => "z.any()".to_string(),
    }
}

fn object_expression(node: &SchemaNode, fields: Vec<String>) -> String {
    let mut expr = if fields.is_empty() {
        "z.object({})".to_string()
    } else {
        let mut body = String::from("z.object({\n");
        for field in fields {
            body.push_str(&field);
            body.push('\n');
        }
        body.push_str("})");
        body
    };
    if node.forbids_additional_properties() {
        expr.push_str(".strict()");
    }
    with_nullable(node, expr)
}

fn field_line(key: &str, expression: &str, required: bool) -> String {
    let optional = if required { "" } else { ".optional()" };
    format!("{}: {expression}{optional},", object_key(key))
}

fn enum_expression(values: &[Value]) -> String {
    if values.iter().all(Value::is_string) {
        let literals: Vec<String> = values.iter().map(Value::to_string).collect();
        return format!("z.enum([{}])", literals.join(", "));
    }
    if let [single] = values {
        return format!("z.literal({single})");
    }
    let literals: Vec<String> = values.iter().map(|v| format!("z.literal({v})")).collect();
    format!("z.union([{}])", literals.join(", "))
}

fn ref_identifier(table: &ExtractionTable, fingerprint: &str) -> String {
    table
        .name_for(fingerprint)
        .map_or_else(|| "z.any()".to_string(), str::to_string)
}

fn string_refinement(format: Option<&str>) -> &'static str {
    match format {
        Some("date-time") => ".datetime()",
        Some("email") => ".email()",
        Some("uri" | "url") => ".url()",
        Some("uuid") => ".uuid()",
        _ => "",
    }
}

fn with_nullable(node: &SchemaNode, mut expr: String) -> String {
    if node.is_nullable() {
        expr.push_str(".nullable()");
    }
    expr
}

/// Bare key when valid as a JS identifier, JSON-quoted otherwise
fn object_key(key: &str) -> String {
    let mut chars = key.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    if valid {
        key.to_string()
    } else {
        serde_json::to_string(key).unwrap_or_default()
    }
}
