//! Schema node model and inference
//!
//! Provides the recursive [`SchemaNode`] shape description shared by the
//! whole pipeline, and inference of nodes from example JSON values.
//!
//! # Features
//!
//! - **Type Inference**: infers node kinds from JSON values
//! - **Required Detection**: non-null object values become required fields
//! - **Array Item Inference**: item shape taken from the first element
//! - **Format Detection**: optional date-time/date/uri/email/uuid hints
//! - **Depth Bounding**: deeply nested values degrade to a bare object node

mod inference;
mod types;

pub use inference::{infer_schema, SchemaInferrer};
pub use types::{SchemaNode, SchemaType};
