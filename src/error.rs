//! Error types for zodsmith
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Inside the conversion core, absence is represented as `Option` rather
//! than an error: a missed extraction, a dangling `$ref`, or an exhausted
//! lookup chain degrades locally instead of failing the conversion. `Error`
//! is reserved for host-level problems (I/O, HTTP, configuration) and for
//! formatter failures, which the pipeline itself catches.

use thiserror::Error;

/// The main error type for zodsmith
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Document Errors
    // ============================================================================
    #[error("Not an OpenAPI document: {message}")]
    InvalidDocument { message: String },

    #[error("No OpenAPI document attached (operation lookup requires one)")]
    MissingDocument,

    // ============================================================================
    // HTTP / Discovery Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("No OpenAPI document found at any candidate path under {base}")]
    DiscoveryExhausted { base: String },

    // ============================================================================
    // Emission Errors
    // ============================================================================
    #[error("Code formatting failed: {message}")]
    Format { message: String },

    #[error("No validation-schema code was produced")]
    NoOutput,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid-document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Create a formatting error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }
}

/// Result type alias for zodsmith
pub type Result<T> = std::result::Result<T, Error>;
