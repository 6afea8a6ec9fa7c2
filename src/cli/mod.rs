//! CLI module
//!
//! Command-line interface for schema generation.
//!
//! # Commands
//!
//! - `infer` - Generate Zod source from a JSON sample
//! - `fragment` - Generate Zod source from a schema fragment
//! - `operation` - Generate Zod source for an OpenAPI operation
//! - `discover` - Probe a base URL for an OpenAPI document
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, ParserChoice};
pub use runner::Runner;
pub use server::{serve, ServerConfig};

#[cfg(test)]
mod tests;
