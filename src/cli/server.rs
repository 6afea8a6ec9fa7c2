//! HTTP server mode for REST API access to schema generation

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::convert::{Converter, Generated};
use crate::error::{Error, Result};
use crate::hints::StaticHints;
use crate::openapi::{parse_status_code, OpenApiDocument};

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Document available to operation lookups
    pub document: Option<OpenApiDocument>,
}

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    config: ServerConfig,
}

/// Request body for the infer endpoint
#[derive(Debug, Deserialize)]
struct InferRequest {
    /// JSON sample to infer from
    #[serde(default)]
    sample: Option<Value>,
    /// Raw text with an embedded JSON sample (used when `sample` is absent)
    #[serde(default)]
    text: Option<String>,
    /// Name bound to the root declaration
    #[serde(default = "default_name")]
    name: String,
    /// Hints map of field path to "required" | "optional"
    #[serde(default)]
    hints: Option<Value>,
}

/// Request body for the operation endpoint
#[derive(Debug, Deserialize)]
struct OperationRequest {
    /// HTTP method
    method: String,
    /// Operation path
    path: String,
    /// Status code text; ignored when `request` is set
    #[serde(default = "default_status")]
    status: String,
    /// Convert the request body instead of a response
    #[serde(default)]
    request: bool,
    /// Name bound to the root declaration
    #[serde(default = "default_name")]
    name: String,
}

fn default_name() -> String {
    "schema".to_string()
}

fn default_status() -> String {
    "200".to_string()
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Generated source payload
#[derive(Debug, Serialize)]
struct GeneratedPayload {
    source: String,
    declarations: Vec<String>,
    formatted: bool,
}

impl From<Generated> for GeneratedPayload {
    fn from(generated: Generated) -> Self {
        Self {
            source: generated.source,
            declarations: generated.declarations,
            formatted: generated.formatted,
        }
    }
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let app = app(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Build the router
pub(crate) fn app(config: ServerConfig) -> Router {
    let state = AppState { config };

    // Build CORS layer - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/infer", post(infer))
        .route("/operation", post(operation))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Generate Zod source from a JSON sample
async fn infer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InferRequest>,
) -> impl IntoResponse {
    let converter = match build_converter(&state, req.hints.as_ref()) {
        Ok(converter) => converter,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(format!("Invalid hints: {e}"))),
            )
                .into_response();
        }
    };

    let generated = match (&req.sample, &req.text) {
        (Some(sample), _) => Some(converter.convert_value(sample, &req.name).await),
        (None, Some(text)) => converter.convert_text(text, &req.name).await,
        (None, None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(
                    "Request needs a `sample` value or a `text` field",
                )),
            )
                .into_response();
        }
    };

    match generated {
        Some(generated) => (
            StatusCode::OK,
            Json(ApiResponse::success(GeneratedPayload::from(generated))),
        )
            .into_response(),
        None => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<()>::error(
                "No validation-schema code was produced",
            )),
        )
            .into_response(),
    }
}

/// Generate Zod source for an operation in the server's document
async fn operation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OperationRequest>,
) -> impl IntoResponse {
    let Some(document) = state.config.document.clone() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                "Server started without an OpenAPI document",
            )),
        )
            .into_response();
    };

    let converter = Converter::new().with_document(document);
    let generated = if req.request {
        converter
            .convert_request(&req.method, &req.path, &req.name)
            .await
    } else {
        let status = parse_status_code(&req.status).unwrap_or_else(|| req.status.clone());
        converter
            .convert_response(&req.method, &req.path, &status, &req.name)
            .await
    };

    match generated {
        Some(generated) => (
            StatusCode::OK,
            Json(ApiResponse::success(GeneratedPayload::from(generated))),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("No matching operation schema")),
        )
            .into_response(),
    }
}

/// Assemble a converter from server state and per-request hints
fn build_converter(state: &AppState, hints: Option<&Value>) -> Result<Converter> {
    let mut converter = Converter::new();
    if let Some(document) = &state.config.document {
        converter = converter.with_document(document.clone());
    }
    if let Some(hints) = hints {
        converter = converter.with_hints(Arc::new(StaticHints::from_value(hints)?));
    }
    Ok(converter)
}
