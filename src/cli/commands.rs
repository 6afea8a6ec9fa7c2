//! CLI commands and argument parsing

use crate::emit::StyleParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Zod validation-schema generator CLI
#[derive(Parser, Debug)]
#[command(name = "zodsmith")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// OpenAPI document file (JSON or YAML)
    #[arg(short, long, global = true)]
    pub openapi: Option<PathBuf>,

    /// Hints file (JSON map of field path to "required" | "optional")
    #[arg(long, global = true)]
    pub hints: Option<PathBuf>,

    /// Name bound to the root declaration
    #[arg(short, long, global = true, default_value = "schema")]
    pub name: String,

    /// Output file (stdout when omitted)
    #[arg(short = 'O', long, global = true)]
    pub out: Option<PathBuf>,

    /// Skip the formatter and emit raw source
    #[arg(long, global = true)]
    pub raw: bool,

    /// Style parser applied by the formatter
    #[arg(long, global = true, default_value = "typescript")]
    pub parser: ParserChoice,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Zod source from a JSON sample
    ///
    /// The sample may be embedded in surrounding text (log lines, docs);
    /// the first balanced JSON value is used.
    Infer {
        /// Input file (stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Generate Zod source from a JSON-Schema-like fragment
    Fragment {
        /// Input file (stdin when omitted)
        input: Option<PathBuf>,

        /// JSON pointer into the OpenAPI document instead of input
        /// (e.g. #/components/schemas/User, requires --openapi)
        #[arg(long)]
        pointer: Option<String>,
    },

    /// Generate Zod source for an operation in the OpenAPI document
    Operation {
        /// HTTP method (GET, POST, ...)
        #[arg(short, long)]
        method: String,

        /// Operation path (/users/{id})
        #[arg(short, long)]
        path: String,

        /// Response status code; any text containing one is accepted
        #[arg(short, long, default_value = "200")]
        status: String,

        /// Convert the request body instead of a response
        #[arg(long)]
        request: bool,
    },

    /// Probe a base URL for an OpenAPI document and write it out
    Discover {
        /// Base URL of the service
        url: String,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Style parser selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ParserChoice {
    /// TypeScript-flavored source
    Typescript,
    /// Plain JavaScript source
    Babel,
}

impl From<ParserChoice> for StyleParser {
    fn from(choice: ParserChoice) -> Self {
        match choice {
            ParserChoice::Typescript => StyleParser::TypeScript,
            ParserChoice::Babel => StyleParser::Babel,
        }
    }
}
