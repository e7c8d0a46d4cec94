//! Runtime configuration.
//!
//! Configuration is a YAML file whose every field is optional; anything left
//! out falls back to the built-in defaults, which reproduce a single
//! Mashable listing source.
//!
//! ```yaml
//! bind_addr: 0.0.0.0:3000
//! request_timeout_secs: 20
//! on_error: partial
//! max_pages: 50
//! sources:
//!   - name: Mashable
//!     base_url: https://sea.mashable.com/
//!     item_selector: li.blogroll.ARTICLE
//!     fields:
//!       headline: { selector: div.caption }
//!       link: { selector: a, attribute: href }
//!       date: { selector: time.datepublished }
//!     pagination: { selector: "div#brollanchor", attribute: data-pagenum }
//!     date: { remove: ".", formats: ["%b %d, %Y"] }
//! ```

use crate::dates::DateStrategy;
use crate::errors::ConfigError;
use crate::fetch::DEFAULT_USER_AGENT;
use crate::models::{FieldSelector, FieldSelectors, PaginationMarker, SourceSpec};
use crate::scrapers::page::CompiledSource;
use crate::scrapers::{ErrorPolicy, ExtractOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application runtime configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// TCP bind address (host:port) for the HTTP server.
    pub bind_addr: String,
    /// User-Agent header sent with every page request.
    pub user_agent: String,
    /// Total timeout of a single page request.
    pub request_timeout_secs: u64,
    /// What to do with gathered records when a later page fails.
    pub on_error: ErrorPolicy,
    /// Optional cap on pages fetched per source.
    pub max_pages: Option<u32>,
    /// How many sources may be scraped at once (pages of one source are
    /// always sequential).
    pub source_concurrency: usize,
    pub sources: Vec<SourceSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            on_error: ErrorPolicy::default(),
            max_pages: None,
            source_concurrency: 1,
            sources: vec![mashable()],
        }
    }
}

/// The listing scraped when no configuration names any source.
pub fn mashable() -> SourceSpec {
    SourceSpec {
        name: "Mashable".to_string(),
        base_url: Url::parse("https://sea.mashable.com/").expect("static url"),
        item_selector: "li.blogroll.ARTICLE".to_string(),
        fields: FieldSelectors {
            headline: FieldSelector::text("div.caption"),
            link: FieldSelector::attr("a", "href"),
            date: FieldSelector::text("time.datepublished"),
        },
        pagination: PaginationMarker {
            selector: "div#brollanchor".to_string(),
            attribute: "data-pagenum".to_string(),
        },
        date: DateStrategy::new(".", &["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d"]),
    }
}

impl Config {
    /// Parse YAML text and validate the result.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML config file.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml(&yaml)?;
        info!(sources = config.sources.len(), "Loaded configuration");
        Ok(config)
    }

    /// Reject configurations that could never scrape anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::Invalid("no sources configured".to_string()));
        }
        if self.source_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "source_concurrency must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.max_pages == Some(0) {
            return Err(ConfigError::Invalid("max_pages must be at least 1".to_string()));
        }
        for source in &self.sources {
            if !matches!(source.base_url.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(format!(
                    "source {}: base_url must be http or https",
                    source.name
                )));
            }
            CompiledSource::compile(source)
                .map_err(|e| ConfigError::Invalid(format!("source {}: {e}", source.name)))?;
        }
        Ok(())
    }

    /// Per-request timeout for [`HttpFetcher`](crate::fetch::HttpFetcher).
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Error policy and page cap applied to every source.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            on_error: self.on_error,
            max_pages: self.max_pages,
        }
    }
}
