//! OpenAPI resolution and lookup tests

use super::*;
use serde_json::{json, Value};

fn sample_doc() -> OpenApiDocument {
    OpenApiDocument::from_value(json!({
        "openapi": "3.0.0",
        "info": {"title": "Pet Store", "version": "1.0.0"},
        "paths": {
            "/users/{id}": {
                "get": {
                    "responses": {
                        "200": {
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/User"}
                                }
                            }
                        }
                    }
                }
            },
            "/pets/": {
                "get": {"responses": {}}
            }
        },
        "components": {
            "schemas": {
                "User": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "integer"},
                        "address": {"$ref": "#/components/schemas/Address"}
                    }
                },
                "Address": {
                    "type": "object",
                    "properties": {
                        "street": {"type": "string"},
                        "city": {"type": "string"}
                    }
                },
                "TreeNode": {
                    "type": "object",
                    "properties": {
                        "value": {"type": "string"},
                        "child": {"$ref": "#/components/schemas/TreeBranch"}
                    }
                },
                "TreeBranch": {
                    "type": "object",
                    "properties": {
                        "node": {"$ref": "#/components/schemas/TreeNode"}
                    }
                }
            }
        }
    }))
    .unwrap()
}

fn count_refs(value: &Value) -> usize {
    match value {
        Value::Object(map) => {
            let own = usize::from(map.contains_key("$ref"));
            own + map.values().map(count_refs).sum::<usize>()
        }
        Value::Array(items) => items.iter().map(count_refs).sum(),
        _ => 0,
    }
}

#[test]
fn test_document_from_json_text() {
    let doc = OpenApiDocument::from_json_text(r#"{"openapi": "3.0.0", "paths": {}}"#).unwrap();
    assert_eq!(doc.version(), Some("3.0.0"));
}

#[test]
fn test_document_from_yaml_text() {
    let text = "swagger: \"2.0\"\ninfo:\n  title: Legacy API\npaths: {}\n";
    let doc = OpenApiDocument::from_yaml_text(text).unwrap();
    assert_eq!(doc.version(), Some("2.0"));
    assert_eq!(doc.title(), Some("Legacy API"));
}

#[test]
fn test_document_from_text_sniffs_both() {
    assert!(OpenApiDocument::from_text(r#"{"paths": {}}"#).is_ok());
    assert!(OpenApiDocument::from_text("paths:\n  /a: {}\n").is_ok());
}

#[test]
fn test_document_root_must_be_object() {
    assert!(OpenApiDocument::from_value(json!([1, 2])).is_err());
    assert!(OpenApiDocument::from_value(json!("nope")).is_err());
}

#[test]
fn test_looks_like_document() {
    assert!(looks_like_document(&json!({"paths": {}})));
    assert!(looks_like_document(&json!({"openapi": "3.1.0"})));
    assert!(looks_like_document(&json!({"swagger": "2.0"})));
    assert!(!looks_like_document(&json!({"data": []})));
    assert!(!looks_like_document(&json!("paths")));
}

#[test]
fn test_resolve_pointer() {
    let doc = sample_doc();

    let address = doc.resolve_pointer("#/components/schemas/Address").unwrap();
    assert_eq!(address["type"], "object");

    assert!(doc.resolve_pointer("#/components/schemas/Missing").is_none());
    assert!(doc.resolve_pointer("http://other.host/schema").is_none());
}

#[test]
fn test_resolve_pointer_array_index() {
    let doc = OpenApiDocument::from_value(json!({
        "paths": {},
        "items": [{"name": "first"}, {"name": "second"}]
    }))
    .unwrap();

    let second = doc.resolve_pointer("#/items/1").unwrap();
    assert_eq!(second["name"], "second");
    assert!(doc.resolve_pointer("#/items/9").is_none());
    assert!(doc.resolve_pointer("#/items/x").is_none());
}

#[test]
fn test_resolve_refs_simple() {
    let doc = sample_doc();
    let schema = json!({"$ref": "#/components/schemas/Address"});

    let resolved = resolve_refs(&schema, &doc);

    assert_eq!(resolved["type"], "object");
    assert_eq!(resolved["properties"]["street"]["type"], "string");
    assert_eq!(count_refs(&resolved), 0);
}

#[test]
fn test_resolve_refs_nested() {
    let doc = sample_doc();
    let schema = json!({"$ref": "#/components/schemas/User"});

    let resolved = resolve_refs(&schema, &doc);

    // The Address ref inside User resolves too
    assert_eq!(
        resolved["properties"]["address"]["properties"]["city"]["type"],
        "string"
    );
    assert_eq!(count_refs(&resolved), 0);
}

#[test]
fn test_resolve_refs_cycle_terminates() {
    let doc = sample_doc();
    let schema = json!({"$ref": "#/components/schemas/TreeNode"});

    let resolved = resolve_refs(&schema, &doc);

    // Expansion stops where the cycle closes, leaving one pointer in place
    assert_eq!(count_refs(&resolved), 1);
    assert_eq!(
        resolved["properties"]["child"]["properties"]["node"]["$ref"],
        "#/components/schemas/TreeNode"
    );
}

#[test]
fn test_resolve_refs_external_pointer_kept() {
    let doc = sample_doc();
    let schema = json!({
        "type": "object",
        "properties": {
            "remote": {"$ref": "https://example.com/schemas/User.json"},
            "local": {"$ref": "#/components/schemas/Address"}
        }
    });

    let resolved = resolve_refs(&schema, &doc);

    assert_eq!(
        resolved["properties"]["remote"]["$ref"],
        "https://example.com/schemas/User.json"
    );
    assert_eq!(resolved["properties"]["local"]["type"], "object");
}

#[test]
fn test_resolve_refs_missing_target_kept() {
    let doc = sample_doc();
    let schema = json!({
        "type": "object",
        "properties": {
            "gone": {"$ref": "#/components/schemas/Missing"},
            "here": {"$ref": "#/components/schemas/Address"}
        }
    });

    let resolved = resolve_refs(&schema, &doc);

    assert_eq!(
        resolved["properties"]["gone"]["$ref"],
        "#/components/schemas/Missing"
    );
    assert_eq!(resolved["properties"]["here"]["properties"]["city"]["type"], "string");
}

#[test]
fn test_resolve_refs_in_arrays() {
    let doc = sample_doc();
    let schema = json!({
        "allOf": [
            {"$ref": "#/components/schemas/Address"},
            {"type": "object", "properties": {"zip": {"type": "string"}}}
        ]
    });

    let resolved = resolve_refs(&schema, &doc);

    assert_eq!(resolved["allOf"][0]["type"], "object");
    assert_eq!(resolved["allOf"][1]["properties"]["zip"]["type"], "string");
    assert_eq!(count_refs(&resolved), 0);
}

#[test]
fn test_resolve_refs_scalar_target_kept() {
    let doc = sample_doc();
    let schema = json!({"$ref": "#/openapi"});

    let resolved = resolve_refs(&schema, &doc);

    assert_eq!(resolved["$ref"], "#/openapi");
}

#[test]
fn test_find_operation_exact() {
    let doc = sample_doc();
    assert!(find_operation(&doc, "get", "/users/{id}").is_some());
    assert!(find_operation(&doc, "GET", "/users/{id}").is_some());
    assert!(find_operation(&doc, "post", "/users/{id}").is_none());
    assert!(find_operation(&doc, "get", "/nope").is_none());
}

#[test]
fn test_find_operation_trailing_slash() {
    let doc = sample_doc();
    // Document key has the slash, request does not - and the reverse
    assert!(find_operation(&doc, "get", "/pets").is_some());
    assert!(find_operation(&doc, "get", "/users/{id}/").is_some());
}

#[test]
fn test_find_operation_prefix_fallback() {
    let doc = sample_doc();

    let direct = find_operation(&doc, "get", "/users/{id}").unwrap();
    let prefixed = find_operation(&doc, "get", "/api/users/{id}").unwrap();
    let versioned = find_operation(&doc, "get", "/api/v2/users/{id}").unwrap();

    assert_eq!(direct, prefixed);
    assert_eq!(direct, versioned);
}

#[test]
fn test_find_operation_adds_missing_prefix() {
    // The document mounts everything under /api/v1 but callers pass the bare path
    let doc = OpenApiDocument::from_value(json!({
        "openapi": "3.0.0",
        "info": {"title": "Mounted", "version": "1.0.0"},
        "paths": {
            "/api/v1/orders": {
                "post": {"responses": {}}
            }
        }
    }))
    .unwrap();

    assert!(find_operation(&doc, "post", "/orders").is_some());
    assert!(find_operation(&doc, "post", "/v9/orders").is_none());
}

#[test]
fn test_response_schema_exact_status() {
    let doc = sample_doc();
    let operation = find_operation(&doc, "get", "/users/{id}").unwrap();

    let schema = response_schema(operation, "200", &doc).unwrap();

    assert_eq!(schema["type"], "object");
    assert_eq!(schema["properties"]["id"]["type"], "integer");
}

#[test]
fn test_response_schema_case_insensitive_and_default() {
    let doc = sample_doc();
    let operation = json!({
        "responses": {
            "Default": {
                "content": {"application/json": {"schema": {"type": "string"}}}
            }
        }
    });

    // "default" matches "Default" case-insensitively
    let schema = response_schema(&operation, "default", &doc).unwrap();
    assert_eq!(schema["type"], "string");

    // An unknown concrete code falls back to the default response
    let operation = json!({
        "responses": {
            "default": {
                "content": {"application/json": {"schema": {"type": "boolean"}}}
            }
        }
    });
    let schema = response_schema(&operation, "404", &doc).unwrap();
    assert_eq!(schema["type"], "boolean");
}

#[test]
fn test_response_schema_content_chain() {
    let doc = sample_doc();

    let wildcard = json!({
        "responses": {"200": {"content": {"*/*": {"schema": {"type": "integer"}}}}}
    });
    let schema = response_schema(&wildcard, "200", &doc).unwrap();
    assert_eq!(schema["type"], "integer");

    let first_declared = json!({
        "responses": {
            "200": {
                "content": {
                    "text/csv": {"schema": {"type": "string"}},
                    "application/xml": {"schema": {"type": "number"}}
                }
            }
        }
    });
    let schema = response_schema(&first_declared, "200", &doc).unwrap();
    assert_eq!(schema["type"], "string");
}

#[test]
fn test_response_schema_legacy_bare_schema() {
    let doc = sample_doc();
    let operation = json!({
        "responses": {
            "200": {"schema": {"$ref": "#/components/schemas/Address"}}
        }
    });

    let schema = response_schema(&operation, "200", &doc).unwrap();

    assert_eq!(schema["properties"]["street"]["type"], "string");
}

#[test]
fn test_response_schema_missing() {
    let doc = sample_doc();
    let operation = json!({"responses": {"204": {"description": "empty"}}});

    assert!(response_schema(&operation, "204", &doc).is_none());
    assert!(response_schema(&json!({}), "200", &doc).is_none());
}

#[test]
fn test_request_body_schema_prefers_json_media() {
    let doc = sample_doc();
    let operation = json!({
        "requestBody": {
            "content": {
                "text/plain": {"schema": {"type": "string"}},
                "application/hal+json": {"schema": {"$ref": "#/components/schemas/Address"}}
            }
        }
    });

    let schema = request_body_schema(&operation, &doc).unwrap();

    assert_eq!(schema["properties"]["city"]["type"], "string");
}

#[test]
fn test_request_body_schema_ref_indirected_body() {
    let doc = OpenApiDocument::from_value(json!({
        "paths": {},
        "components": {
            "requestBodies": {
                "NewPet": {
                    "content": {"application/json": {"schema": {"type": "object"}}}
                }
            }
        }
    }))
    .unwrap();
    let operation = json!({
        "requestBody": {"$ref": "#/components/requestBodies/NewPet"}
    });

    let schema = request_body_schema(&operation, &doc).unwrap();

    assert_eq!(schema["type"], "object");
}

#[test]
fn test_request_body_schema_body_parameter_fallback() {
    let doc = OpenApiDocument::from_value(json!({
        "paths": {},
        "parameters": {
            "Payload": {
                "in": "body",
                "name": "payload",
                "schema": {"type": "object", "properties": {"id": {"type": "integer"}}}
            }
        }
    }))
    .unwrap();
    let operation = json!({
        "parameters": [
            {"in": "query", "name": "page"},
            {"$ref": "#/parameters/Payload"}
        ]
    });

    let schema = request_body_schema(&operation, &doc).unwrap();

    assert_eq!(schema["properties"]["id"]["type"], "integer");
}

#[test]
fn test_request_body_schema_missing() {
    let doc = sample_doc();
    assert!(request_body_schema(&json!({}), &doc).is_none());
    assert!(request_body_schema(
        &json!({"parameters": [{"in": "query", "name": "q"}]}),
        &doc
    )
    .is_none());
}

#[test]
fn test_parse_status_code() {
    assert_eq!(parse_status_code("200 OK").as_deref(), Some("200"));
    assert_eq!(
        parse_status_code("Error 404 Not Found").as_deref(),
        Some("404")
    );
    assert_eq!(parse_status_code("Default response").as_deref(), Some("default"));
    assert_eq!(parse_status_code("DEFAULT").as_deref(), Some("default"));
    assert_eq!(parse_status_code("no codes here"), None);
    // Digits embedded in longer numbers do not match
    assert_eq!(parse_status_code("id 20000"), None);
}
