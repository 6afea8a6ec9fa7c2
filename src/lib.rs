// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # zodsmith
//!
//! Generate compact, deduplicated Zod validation schemas from JSON samples
//! and OpenAPI documents.
//!
//! ## Features
//!
//! - **Embedded-JSON Extraction**: find the first balanced JSON value inside
//!   surrounding text
//! - **Schema Inference**: total inference from example values, with optional
//!   string-format detection
//! - **OpenAPI Support**: cycle-safe `$ref` resolution, operation lookup with
//!   path-prefix fallbacks, document discovery by probing
//! - **Deduplication**: structurally identical sub-schemas collapse to one
//!   named declaration referenced from every use site
//! - **Zod Emission**: readable `export const` declarations, formatted or raw
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zodsmith::Converter;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sample = serde_json::json!({
//!         "id": 1,
//!         "name": "a",
//!         "tags": [{"label": "new", "score": 3}]
//!     });
//!
//!     let generated = Converter::new()
//!         .convert_value(&sample, "responseSchema")
//!         .await;
//!     println!("{}", generated.source);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Converter                           │
//! │  convert_value()  convert_text()  convert_fragment()         │
//! │  convert_response()  convert_request()                       │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌─────────┬──────────┬────────┴────────┬──────────┬───────────┐
//! │ extract │  schema  │     openapi     │  dedup   │   emit    │
//! ├─────────┼──────────┼─────────────────┼──────────┼───────────┤
//! │ Balanced│ Inference│ $ref resolution │ Canonical│ Zod source│
//! │ JSON    │ Formats  │ Operation lookup│ Naming   │ Formatting│
//! └─────────┴──────────┴─────────────────┴──────────┴───────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Add docs before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for zodsmith
pub mod error;

/// Embedded-JSON extraction from raw text
pub mod extract;

/// Schema node model and inference
pub mod schema;

/// OpenAPI document handling: pointers, `$ref` resolution, operation lookup
pub mod openapi;

/// Presentation-hint merge
pub mod hints;

/// Deduplication and naming engine
pub mod dedup;

/// Zod emission and source formatting
pub mod emit;

/// Conversion pipeline
pub mod convert;

/// OpenAPI document discovery by probing
pub mod discovery;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

// Re-export commonly used types
pub use convert::{Converter, Generated};
pub use openapi::OpenApiDocument;
pub use schema::{infer_schema, SchemaInferrer, SchemaNode, SchemaType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
