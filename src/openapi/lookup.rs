//! Operation, response, and request-body lookup

use super::document::OpenApiDocument;
use super::resolver::{deref_once, resolve_refs};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Prefixes rendered pages often show but document keys omit (or vice versa)
const COMMON_PATH_PREFIXES: [&str; 5] = ["/api", "/v1", "/v2", "/api/v1", "/api/v2"];

/// First HTTP status code or "default" token in free text
static STATUS_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(1\d{2}|2\d{2}|3\d{2}|4\d{2}|5\d{2}|default)\b").unwrap());

/// Pull the first status-code-or-"default" token out of free text
pub fn parse_status_code(text: &str) -> Option<String> {
    STATUS_CODE_REGEX
        .find(text)
        .map(|m| m.as_str().to_lowercase())
}

/// Locate an operation in the document's `paths` by method and path
///
/// Tries, in order: the exact path; the path with a trailing slash toggled;
/// for each common prefix, the path with that prefix stripped (when it
/// carries it) and the path with that prefix added. First match wins.
pub fn find_operation<'a>(doc: &'a OpenApiDocument, method: &str, path: &str) -> Option<&'a Value> {
    let paths = doc.paths()?;
    let method = method.to_lowercase();
    let lookup = |key: &str| paths.get(key).and_then(|item| item.get(method.as_str()));

    if let Some(operation) = lookup(path) {
        return Some(operation);
    }

    let toggled = match path.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => format!("{path}/"),
    };
    if let Some(operation) = lookup(&toggled) {
        return Some(operation);
    }

    for prefix in COMMON_PATH_PREFIXES {
        if let Some(stripped) = path.strip_prefix(prefix) {
            if let Some(operation) = lookup(stripped) {
                return Some(operation);
            }
        }
        if let Some(operation) = lookup(&format!("{prefix}{path}")) {
            return Some(operation);
        }
    }

    None
}

/// Resolve the response schema for an operation and status code
///
/// Status keys are tried exactly, then case-insensitively, then falling back
/// to `"default"`. Within the response, media types are tried in the order
/// `application/json`, `*/*`, first declared entry, then a legacy bare
/// `schema` field. The winner has its `$ref`s resolved.
pub fn response_schema(operation: &Value, status: &str, doc: &OpenApiDocument) -> Option<Value> {
    let responses = operation.get("responses")?.as_object()?;

    let mut response = responses.get(status);

    if response.is_none() {
        let normalized = status.to_lowercase();
        response = responses
            .iter()
            .find(|(code, _)| code.to_lowercase() == normalized)
            .map(|(_, resp)| resp);
    }

    if response.is_none() && !status.eq_ignore_ascii_case("default") {
        response = responses.get("default");
    }

    let response = response?;

    if let Some(content) = response.get("content").and_then(Value::as_object) {
        let media = content
            .get("application/json")
            .or_else(|| content.get("*/*"))
            .or_else(|| content.values().next());
        if let Some(schema) = media.and_then(|entry| entry.get("schema")) {
            return Some(resolve_refs(schema, doc));
        }
    }

    response
        .get("schema")
        .map(|schema| resolve_refs(schema, doc))
}

/// Resolve the request-body schema for an operation
///
/// Prefers `requestBody.content` with a media type containing "json", then
/// the response fallback chain. When `requestBody` yields nothing, scans
/// `parameters` for a (possibly `$ref`-indirected) `in == "body"` parameter
/// carrying a `schema`.
pub fn request_body_schema(operation: &Value, doc: &OpenApiDocument) -> Option<Value> {
    if let Some(raw_body) = operation.get("requestBody") {
        let body = deref_once(raw_body, doc);
        if let Some(content) = body.get("content").and_then(Value::as_object) {
            let json_entry = content
                .iter()
                .find(|(media_type, _)| media_type.to_lowercase().contains("json"))
                .map(|(_, entry)| entry);
            let media = json_entry
                .or_else(|| content.get("application/json"))
                .or_else(|| content.get("*/*"))
                .or_else(|| content.values().next());
            if let Some(schema) = media.and_then(|entry| entry.get("schema")) {
                return Some(resolve_refs(schema, doc));
            }
        }
    }

    let parameters = operation.get("parameters")?.as_array()?;
    for param in parameters {
        let param = deref_once(param, doc);
        if param.get("in").and_then(Value::as_str) == Some("body") {
            if let Some(schema) = param.get("schema") {
                return Some(resolve_refs(schema, doc));
            }
        }
    }

    None
}
