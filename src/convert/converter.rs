//! Conversion pipeline front door

use crate::dedup::extract_named_schemas;
use crate::emit::{BuiltinFormatter, CodeFormatter, EmittedSource, StyleParser, ZodEmitter};
use crate::extract::parse_embedded_json;
use crate::hints::{apply_hints, NoHints, PresentationHints};
use crate::openapi::{
    find_operation, request_body_schema, resolve_refs, response_schema, OpenApiDocument,
};
use crate::schema::{SchemaInferrer, SchemaNode};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Result of a conversion
#[derive(Debug, Clone)]
pub struct Generated {
    /// Declaration source, formatted when `formatted` is true
    pub source: String,
    /// Identifiers bound by the source, in declaration order
    pub declarations: Vec<String>,
    /// Whether the formatting collaborator succeeded
    pub formatted: bool,
}

/// Converter for turning JSON samples and schema fragments into Zod source
///
/// Collaborators attach with builder methods: an OpenAPI document enables
/// `$ref` resolution and operation lookup, presentation hints demote fields
/// to optional, and the formatter post-processes emitted source. Formatting
/// is the only await; a formatter error degrades to the unformatted source
/// rather than failing the conversion.
pub struct Converter {
    /// Document for `$ref` resolution and operation lookup
    document: Option<OpenApiDocument>,
    /// Field requirement judgments merged into inferred schemas
    hints: Arc<dyn PresentationHints>,
    /// Source formatter
    formatter: Arc<dyn CodeFormatter>,
    /// Style parser the formatter should apply
    style_parser: StyleParser,
    /// Inference settings for example values
    inferrer: SchemaInferrer,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// Create a converter with no document, no hints, and the built-in
    /// formatter
    pub fn new() -> Self {
        Self {
            document: None,
            hints: Arc::new(NoHints),
            formatter: Arc::new(BuiltinFormatter::new()),
            style_parser: StyleParser::default(),
            inferrer: SchemaInferrer::new(),
        }
    }

    /// Attach an OpenAPI document
    #[must_use]
    pub fn with_document(mut self, document: OpenApiDocument) -> Self {
        self.document = Some(document);
        self
    }

    /// Attach presentation hints
    #[must_use]
    pub fn with_hints(mut self, hints: Arc<dyn PresentationHints>) -> Self {
        self.hints = hints;
        self
    }

    /// Replace the formatter
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn CodeFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Select the style parser passed to the formatter
    #[must_use]
    pub fn with_style_parser(mut self, parser: StyleParser) -> Self {
        self.style_parser = parser;
        self
    }

    /// Replace the inference settings
    #[must_use]
    pub fn with_inferrer(mut self, inferrer: SchemaInferrer) -> Self {
        self.inferrer = inferrer;
        self
    }

    /// Get the attached document, if any
    pub fn document(&self) -> Option<&OpenApiDocument> {
        self.document.as_ref()
    }

    /// Convert an example JSON value
    pub async fn convert_value(&self, value: &Value, main_name: &str) -> Generated {
        let root = self.inferrer.infer(value);
        self.render(root, main_name).await
    }

    /// Convert raw text containing an embedded JSON value
    ///
    /// `None` when the text holds no balanced, parseable JSON.
    pub async fn convert_text(&self, text: &str, main_name: &str) -> Option<Generated> {
        let value = parse_embedded_json(text)?;
        Some(self.convert_value(&value, main_name).await)
    }

    /// Convert a JSON-Schema-like fragment
    ///
    /// `$ref` pointers are resolved against the attached document; without
    /// one they stay in place and emit permissively. A fragment that does
    /// not parse as a schema degrades to an unconstrained node.
    pub async fn convert_fragment(&self, fragment: &Value, main_name: &str) -> Generated {
        let resolved = match &self.document {
            Some(doc) => resolve_refs(fragment, doc),
            None => fragment.clone(),
        };
        let root = SchemaNode::from_value(&resolved).unwrap_or_default();
        self.render(root, main_name).await
    }

    /// Convert the response schema of an operation in the attached document
    ///
    /// `None` when no document is attached, the operation is not found, or
    /// the status yields no schema.
    pub async fn convert_response(
        &self,
        method: &str,
        path: &str,
        status: &str,
        main_name: &str,
    ) -> Option<Generated> {
        let doc = self.document.as_ref()?;
        let operation = find_operation(doc, method, path)?;
        let schema = response_schema(operation, status, doc)?;
        let root = SchemaNode::from_value(&schema).ok()?;
        Some(self.render(root, main_name).await)
    }

    /// Convert the request-body schema of an operation in the attached
    /// document
    pub async fn convert_request(
        &self,
        method: &str,
        path: &str,
        main_name: &str,
    ) -> Option<Generated> {
        let doc = self.document.as_ref()?;
        let operation = find_operation(doc, method, path)?;
        let schema = request_body_schema(operation, doc)?;
        let root = SchemaNode::from_value(&schema).ok()?;
        Some(self.render(root, main_name).await)
    }

    /// Shared pipeline tail: hint merge, extraction, emission, formatting
    async fn render(&self, mut root: SchemaNode, main_name: &str) -> Generated {
        apply_hints(&mut root, self.hints.as_ref());
        let (processed, table) = extract_named_schemas(&root);
        let emitted = ZodEmitter::new().emit(&processed, &table, main_name);
        self.format(emitted).await
    }

    async fn format(&self, emitted: EmittedSource) -> Generated {
        match self
            .formatter
            .format(&emitted.source, self.style_parser)
            .await
        {
            Ok(source) => Generated {
                source,
                declarations: emitted.declarations,
                formatted: true,
            },
            Err(err) => {
                warn!("Formatting failed, returning unformatted source: {}", err);
                Generated {
                    source: emitted.source,
                    declarations: emitted.declarations,
                    formatted: false,
                }
            }
        }
    }
}
