//! OpenAPI document discovery
//!
//! Locates a service's OpenAPI document by probing the well-known paths
//! UIs and frameworks serve them from. Probing is best-effort: any failed
//! attempt (connection error, non-2xx, wrong content type, body that is
//! not a document) moves on to the next candidate.
//!
//! # Overview
//!
//! The discovery module provides:
//! - `DocumentFinder` - Probes candidate URLs derived from a base URL
//! - `DiscoveryConfig` - Timeout and user-agent settings
//! - `DiscoveredDocument` - A located document and the URL it came from

mod finder;

pub use finder::{DiscoveredDocument, DiscoveryConfig, DiscoveryConfigBuilder, DocumentFinder};
