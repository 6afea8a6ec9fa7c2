//! Conversion pipeline
//!
//! One awaitable operation per input kind: example values, raw text with
//! embedded JSON, schema fragments, and OpenAPI operations. Every call runs
//! the same pipeline (infer/parse, hint merge, extraction, emission,
//! formatting) against a fresh extraction table, so concurrent conversions
//! share no state.
//!
//! # Overview
//!
//! The convert module provides:
//! - `Converter` - Pipeline front door with attachable collaborators
//! - `Generated` - Emitted source plus its declaration identifiers

mod converter;

pub use converter::{Converter, Generated};
