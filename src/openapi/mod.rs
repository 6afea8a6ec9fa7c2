//! OpenAPI document handling
//!
//! Loads documents (JSON or YAML), resolves `$ref` pointers with a cycle
//! guard, and looks up operation, response, and request-body schemas the way
//! rendered API documentation references them.

mod document;
mod lookup;
mod resolver;

pub use document::{looks_like_document, OpenApiDocument};
pub use lookup::{find_operation, parse_status_code, request_body_schema, response_schema};
pub use resolver::resolve_refs;

#[cfg(test)]
mod tests;
