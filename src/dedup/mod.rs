//! Deduplication and naming engine
//!
//! Walks a schema tree, extracts repeated or nameable sub-shapes into a flat
//! table keyed by canonical fingerprint, and assigns each entry a readable
//! identifier synthesized from the names of every site that referenced it.
//!
//! # Features
//!
//! - **Canonical Fingerprints**: key-order-independent dedup keys
//! - **Depth-First Extraction**: table entries may reference other entries
//! - **Candidate Naming**: one shape named from all its occurrence sites
//! - **Depth Bounding**: runaway recursion on quasi-cyclic shapes prevented

mod canonical;
mod naming;
mod types;
mod walker;

pub use canonical::{canonicalize, fingerprint};
pub use types::{ExtractedEntry, ExtractionTable, ProcessedNode};
pub use walker::extract_named_schemas;
