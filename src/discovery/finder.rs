//! Candidate-URL probing

use crate::error::Result;
use crate::openapi::{looks_like_document, OpenApiDocument};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Well-known document locations, in probe order
const CANDIDATE_PATHS: [&str; 6] = [
    "/json",
    "/v3/api-docs",
    "/v2/api-docs",
    "/swagger.json",
    "/openapi.json",
    "/api-docs",
];

/// Configuration for document discovery
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: format!("zodsmith/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl DiscoveryConfig {
    /// Create a new config builder
    pub fn builder() -> DiscoveryConfigBuilder {
        DiscoveryConfigBuilder::default()
    }
}

/// Builder for discovery config
#[derive(Default)]
pub struct DiscoveryConfigBuilder {
    config: DiscoveryConfig,
}

impl DiscoveryConfigBuilder {
    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> DiscoveryConfig {
        self.config
    }
}

/// A document located by probing
#[derive(Debug, Clone)]
pub struct DiscoveredDocument {
    /// URL the document was fetched from
    pub url: String,
    /// The parsed document
    pub document: OpenApiDocument,
}

/// Probes well-known locations for an OpenAPI document
pub struct DocumentFinder {
    client: Client,
}

impl Default for DocumentFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentFinder {
    /// Create a finder with default configuration
    pub fn new() -> Self {
        Self::with_config(DiscoveryConfig::default())
    }

    /// Create a finder with custom configuration
    pub fn with_config(config: DiscoveryConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Probe candidate locations under a base URL
    ///
    /// Candidates relative to the base pathname (with any `/swagger-ui…`
    /// tail removed) are tried before origin-relative ones. The first 2xx
    /// response with a JSON content type whose body parses and looks like
    /// an OpenAPI document wins; `Ok(None)` when every candidate fails.
    pub async fn discover(&self, base: &str) -> Result<Option<DiscoveredDocument>> {
        let base_url = Url::parse(base)?;

        for candidate in candidate_urls(&base_url) {
            if let Some(found) = self.probe(&candidate).await {
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    async fn probe(&self, url: &str) -> Option<DiscoveredDocument> {
        debug!("Probing {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!("Request to {} failed: {}", url, err);
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("{} answered {}", url, response.status());
            return None;
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_lowercase();
        if !content_type.contains("json") {
            debug!("{} served content type {:?}, skipping", url, content_type);
            return None;
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                debug!("Body from {} did not parse as JSON: {}", url, err);
                return None;
            }
        };

        if !looks_like_document(&body) {
            debug!("{} returned JSON without document markers", url);
            return None;
        }

        let document = OpenApiDocument::from_value(body).ok()?;
        Some(DiscoveredDocument {
            url: url.to_string(),
            document,
        })
    }
}

/// Derive probe URLs from a base: pathname-relative candidates first, then
/// origin-relative ones, duplicates skipped
pub(crate) fn candidate_urls(base: &Url) -> Vec<String> {
    let origin = base.origin().ascii_serialization();
    let pathname = trimmed_pathname(base.path());

    let mut urls = Vec::new();
    if !pathname.is_empty() {
        for path in CANDIDATE_PATHS {
            urls.push(format!("{origin}{pathname}{path}"));
        }
    }
    for path in CANDIDATE_PATHS {
        let url = format!("{origin}{path}");
        if !urls.contains(&url) {
            urls.push(url);
        }
    }

    urls
}

/// Strip any `/swagger-ui…` tail and a trailing slash from a pathname
fn trimmed_pathname(path: &str) -> &str {
    let cut = path
        .find("/swagger-ui")
        .map_or(path, |index| &path[..index]);
    cut.trim_end_matches('/')
}
