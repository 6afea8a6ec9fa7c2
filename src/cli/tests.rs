//! CLI and server smoke tests

use super::runner::parse_json_or_yaml;
use super::*;
use crate::emit::StyleParser;
use crate::error::Error;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use clap::Parser;
use serde_json::json;
use std::fs;
use tower::ServiceExt;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn test_parse_infer_command() {
    let cli = parse(&["zodsmith", "--name", "userSchema", "infer", "sample.json"]);

    assert_eq!(cli.name, "userSchema");
    assert!(matches!(cli.command, Commands::Infer { input: Some(_) }));
}

#[test]
fn test_parse_operation_command() {
    let cli = parse(&[
        "zodsmith",
        "--openapi",
        "api.yaml",
        "operation",
        "-m",
        "GET",
        "-p",
        "/users/{id}",
        "--status",
        "200",
    ]);

    assert!(cli.openapi.is_some());
    match cli.command {
        Commands::Operation {
            method,
            path,
            status,
            request,
        } => {
            assert_eq!(method, "GET");
            assert_eq!(path, "/users/{id}");
            assert_eq!(status, "200");
            assert!(!request);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_rejects_unknown_parser() {
    assert!(Cli::try_parse_from(["zodsmith", "--parser", "ruby", "infer"]).is_err());
}

#[test]
fn test_parser_choice_conversion() {
    assert_eq!(
        StyleParser::from(ParserChoice::Typescript),
        StyleParser::TypeScript
    );
    assert_eq!(StyleParser::from(ParserChoice::Babel), StyleParser::Babel);
}

#[test]
fn test_parse_json_or_yaml_sniffing() {
    let from_json = parse_json_or_yaml(r#"{"type": "string"}"#).unwrap();
    assert_eq!(from_json["type"], "string");

    let from_yaml = parse_json_or_yaml("type: string\nnullable: true\n").unwrap();
    assert_eq!(from_yaml["type"], "string");

    assert!(parse_json_or_yaml("{:not valid").is_err());
}

#[tokio::test]
async fn test_runner_infer_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.json");
    fs::write(&input, r#"some prose {"id": 1, "name": "a"} more prose"#).unwrap();
    let out = dir.path().join("generated.ts");

    let cli = Cli {
        openapi: None,
        hints: None,
        name: "userSchema".to_string(),
        out: Some(out.clone()),
        raw: false,
        parser: ParserChoice::Typescript,
        command: Commands::Infer {
            input: Some(input),
        },
    };
    Runner::new(cli).run().await.unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("import { z } from \"zod\";"));
    assert!(written.contains("export const userSchema = z.object({"));
    assert!(written.contains("id: z.number().int(),"));
}

#[tokio::test]
async fn test_runner_infer_applies_hints_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.json");
    fs::write(&input, r#"{"id": 1, "nickname": "zed"}"#).unwrap();
    let hints = dir.path().join("hints.json");
    fs::write(&hints, r#"{"nickname": "optional"}"#).unwrap();
    let out = dir.path().join("generated.ts");

    let cli = Cli {
        openapi: None,
        hints: Some(hints),
        name: "userSchema".to_string(),
        out: Some(out.clone()),
        raw: false,
        parser: ParserChoice::Typescript,
        command: Commands::Infer {
            input: Some(input),
        },
    };
    Runner::new(cli).run().await.unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("nickname: z.string().optional(),"));
}

#[tokio::test]
async fn test_runner_fragment_pointer_from_yaml_document() {
    let dir = tempfile::tempdir().unwrap();
    let openapi = dir.path().join("api.yaml");
    fs::write(
        &openapi,
        concat!(
            "openapi: 3.0.0\n",
            "paths: {}\n",
            "components:\n",
            "  schemas:\n",
            "    User:\n",
            "      type: object\n",
            "      required: [id]\n",
            "      properties:\n",
            "        id: {type: integer}\n",
            "        email: {type: string}\n",
        ),
    )
    .unwrap();
    let out = dir.path().join("generated.ts");

    let cli = Cli {
        openapi: Some(openapi),
        hints: None,
        name: "userSchema".to_string(),
        out: Some(out.clone()),
        raw: false,
        parser: ParserChoice::Typescript,
        command: Commands::Fragment {
            input: None,
            pointer: Some("#/components/schemas/User".to_string()),
        },
    };
    Runner::new(cli).run().await.unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("id: z.number().int(),"));
    assert!(written.contains("email: z.string().optional(),"));
}

#[tokio::test]
async fn test_runner_operation_requires_document() {
    let cli = Cli {
        openapi: None,
        hints: None,
        name: "schema".to_string(),
        out: None,
        raw: false,
        parser: ParserChoice::Typescript,
        command: Commands::Operation {
            method: "GET".to_string(),
            path: "/users".to_string(),
            status: "200".to_string(),
            request: false,
        },
    };

    let err = Runner::new(cli).run().await.unwrap_err();
    assert!(matches!(err, Error::MissingDocument));
}

fn server_doc() -> crate::openapi::OpenApiDocument {
    crate::openapi::OpenApiDocument::from_value(json!({
        "openapi": "3.0.0",
        "paths": {
            "/users": {
                "get": {
                    "responses": {
                        "200": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "required": ["id"],
                                        "properties": {"id": {"type": "integer"}}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }))
    .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_server_health() {
    let app = server::app(ServerConfig { document: None });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("ok"));
}

#[tokio::test]
async fn test_server_infer_from_sample() {
    let app = server::app(ServerConfig { document: None });

    let response = app
        .oneshot(json_request(
            "/infer",
            json!({"sample": {"id": 1, "name": "a"}, "name": "userSchema"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("\"success\":true"));
    assert!(body.contains("export const userSchema"));
}

#[tokio::test]
async fn test_server_infer_rejects_empty_request() {
    let app = server::app(ServerConfig { document: None });

    let response = app
        .oneshot(json_request("/infer", json!({"name": "s"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_server_infer_text_without_json() {
    let app = server::app(ServerConfig { document: None });

    let response = app
        .oneshot(json_request("/infer", json!({"text": "no payload here"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response)
        .await
        .contains("No validation-schema code was produced"));
}

#[tokio::test]
async fn test_server_operation_lookup() {
    let app = server::app(ServerConfig {
        document: Some(server_doc()),
    });

    let response = app
        .oneshot(json_request(
            "/operation",
            json!({"method": "GET", "path": "/users", "status": "HTTP 200 OK"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("id: z.number().int()"));
}

#[tokio::test]
async fn test_server_operation_without_document() {
    let app = server::app(ServerConfig { document: None });

    let response = app
        .oneshot(json_request(
            "/operation",
            json!({"method": "GET", "path": "/users"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
