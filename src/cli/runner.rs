//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::cli::server::{serve, ServerConfig};
use crate::convert::{Converter, Generated};
use crate::discovery::DocumentFinder;
use crate::emit::PassthroughFormatter;
use crate::error::{Error, Result};
use crate::hints::{NoHints, PresentationHints, StaticHints};
use crate::openapi::{parse_status_code, OpenApiDocument};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Infer { input } => self.infer(input.as_deref()).await,
            Commands::Fragment { input, pointer } => {
                self.fragment(input.as_deref(), pointer.as_deref()).await
            }
            Commands::Operation {
                method,
                path,
                status,
                request,
            } => self.operation(method, path, status, *request).await,
            Commands::Discover { url } => self.discover(url).await,
            Commands::Serve { port } => {
                let config = ServerConfig {
                    document: self.load_document()?,
                };
                serve(config, *port).await
            }
        }
    }

    /// Generate from a JSON sample, possibly embedded in text
    async fn infer(&self, input: Option<&Path>) -> Result<()> {
        let text = self.read_input(input)?;
        let converter = self.build_converter()?;

        let generated = converter
            .convert_text(&text, &self.cli.name)
            .await
            .ok_or(Error::NoOutput)?;

        self.write_generated(&generated)
    }

    /// Generate from a schema fragment or a document pointer
    async fn fragment(&self, input: Option<&Path>, pointer: Option<&str>) -> Result<()> {
        let fragment = match pointer {
            Some(pointer) => {
                let document = self
                    .load_document()?
                    .ok_or_else(|| Error::config("--pointer requires --openapi"))?;
                document
                    .resolve_pointer(pointer)
                    .cloned()
                    .ok_or_else(|| Error::config(format!("Pointer not found: {pointer}")))?
            }
            None => parse_json_or_yaml(&self.read_input(input)?)?,
        };

        let converter = self.build_converter()?;
        let generated = converter.convert_fragment(&fragment, &self.cli.name).await;

        self.write_generated(&generated)
    }

    /// Generate for an operation in the attached document
    async fn operation(
        &self,
        method: &str,
        path: &str,
        status_text: &str,
        request: bool,
    ) -> Result<()> {
        if self.cli.openapi.is_none() {
            return Err(Error::MissingDocument);
        }
        let converter = self.build_converter()?;

        let generated = if request {
            converter.convert_request(method, path, &self.cli.name).await
        } else {
            let status =
                parse_status_code(status_text).unwrap_or_else(|| status_text.to_string());
            converter
                .convert_response(method, path, &status, &self.cli.name)
                .await
        };

        let generated = generated.ok_or(Error::NoOutput)?;
        self.write_generated(&generated)
    }

    /// Probe a base URL and write the discovered document
    async fn discover(&self, url: &str) -> Result<()> {
        let found = DocumentFinder::new()
            .discover(url)
            .await?
            .ok_or_else(|| Error::DiscoveryExhausted {
                base: url.to_string(),
            })?;

        tracing::info!("Found OpenAPI document at {}", found.url);
        let pretty = serde_json::to_string_pretty(found.document.root())?;
        self.write_output(&pretty)
    }

    /// Assemble a converter from the global flags
    fn build_converter(&self) -> Result<Converter> {
        let mut converter = Converter::new()
            .with_hints(self.load_hints()?)
            .with_style_parser(self.cli.parser.into());

        if self.cli.raw {
            converter = converter.with_formatter(Arc::new(PassthroughFormatter));
        }
        if let Some(document) = self.load_document()? {
            converter = converter.with_document(document);
        }

        Ok(converter)
    }

    /// Load the OpenAPI document when `--openapi` was given
    fn load_document(&self) -> Result<Option<OpenApiDocument>> {
        let Some(path) = &self.cli.openapi else {
            return Ok(None);
        };
        let content = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read OpenAPI document: {e}")))?;
        OpenApiDocument::from_text(&content).map(Some)
    }

    /// Load the hints file when `--hints` was given
    fn load_hints(&self) -> Result<Arc<dyn PresentationHints>> {
        let Some(path) = &self.cli.hints else {
            return Ok(Arc::new(NoHints));
        };
        let content = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read hints file: {e}")))?;
        let value: Value = serde_json::from_str(&content)?;
        Ok(Arc::new(StaticHints::from_value(&value)?))
    }

    /// Read an input file, or stdin when none was given
    fn read_input(&self, input: Option<&Path>) -> Result<String> {
        match input {
            Some(path) => fs::read_to_string(path)
                .map_err(|e| Error::config(format!("Failed to read input file: {e}"))),
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| Error::config(format!("Failed to read stdin: {e}")))?;
                Ok(buffer)
            }
        }
    }

    fn write_generated(&self, generated: &Generated) -> Result<()> {
        self.write_output(&generated.source)
    }

    /// Write to the output file, or stdout when none was given
    fn write_output(&self, source: &str) -> Result<()> {
        match &self.cli.out {
            Some(path) => fs::write(path, source)
                .map_err(|e| Error::config(format!("Failed to write output file: {e}"))),
            None => {
                println!("{source}");
                Ok(())
            }
        }
    }
}

/// Parse a value from text, sniffing JSON first and falling back to YAML
pub(crate) fn parse_json_or_yaml(text: &str) -> Result<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(_) => Ok(serde_yaml::from_str(text)?),
    }
}
