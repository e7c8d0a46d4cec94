//! Data models for sources, extracted records and aggregated output.
//!
//! This module defines the core data structures used throughout the application:
//! - [`SourceSpec`]: Immutable description of one paginated news listing
//! - [`Record`]: One extracted headline/link/date triple
//! - [`ResultSet`]: The sorted records of a single source for one invocation
//! - [`NewsPage`]: Aggregated reports for every configured source
//!
//! Source definitions are deserialized from the YAML configuration, while
//! records and pages serialize to the JSON output and the `/api/news` endpoint.

use crate::dates::DateStrategy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use url::Url;

/// Description of one paginated listing to scrape.
///
/// # Example (YAML)
///
/// ```yaml
/// name: Mashable
/// base_url: https://sea.mashable.com/
/// item_selector: li.blogroll.ARTICLE
/// fields:
///   headline: { selector: div.caption }
///   link: { selector: a, attribute: href }
///   date: { selector: time.datepublished }
/// pagination: { selector: "div#brollanchor", attribute: data-pagenum }
/// date: { remove: ".", formats: ["%b %d, %Y"] }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SourceSpec {
    /// Display name of the source, used as the section heading.
    pub name: String,
    /// Listing URL; the `page` query parameter is appended to it.
    pub base_url: Url,
    /// CSS selector matching each repeated article node.
    pub item_selector: String,
    /// Per-item field selectors, evaluated relative to each item node.
    pub fields: FieldSelectors,
    /// Marker whose presence signals a further page.
    pub pagination: PaginationMarker,
    /// How the date field is turned into a point in time.
    #[serde(default)]
    pub date: DateStrategy,
}

/// Nested selectors for the three fields of a [`Record`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FieldSelectors {
    pub headline: FieldSelector,
    pub link: FieldSelector,
    pub date: FieldSelector,
}

/// A CSS selector plus an optional attribute to read.
///
/// Without an attribute the text content of the first matching node is used.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FieldSelector {
    pub selector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl FieldSelector {
    /// Read the trimmed text content of the first node matching `selector`.
    pub fn text(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            attribute: None,
        }
    }

    /// Read `attribute` from the first node matching `selector`.
    pub fn attr(selector: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            attribute: Some(attribute.into()),
        }
    }
}

/// The "next page" signal embedded in a listing page.
///
/// A further page exists when some node matching `selector` carries
/// `attribute` equal to the next page number.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PaginationMarker {
    pub selector: String,
    pub attribute: String,
}

/// Publication time of a record.
///
/// Unparsable dates keep their raw text and order before every parsed
/// date, so they end up last in a newest-first listing.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PublishedAt {
    Parsed(DateTime<Utc>),
    Unparsed(String),
}

impl PublishedAt {
    /// The parsed instant, if any.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            PublishedAt::Parsed(dt) => Some(*dt),
            PublishedAt::Unparsed(_) => None,
        }
    }

    /// Chronological comparison with every unparsed value equal and oldest.
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        self.instant().cmp(&other.instant())
    }
}

/// One extracted article.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Record {
    /// Trimmed, never empty.
    pub headline: String,
    /// Always absolute.
    pub link: Url,
    pub published_at: PublishedAt,
}

/// Where extraction stopped when the `partial` error policy kept the
/// records gathered so far.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PartialFailure {
    /// The page whose fetch or parse failed.
    pub page: u32,
    pub error: String,
}

/// Sorted records of one source for one invocation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ResultSet {
    pub source_name: String,
    /// Newest first; ties keep extraction order.
    pub records: Vec<Record>,
    /// Number of successful page fetches.
    pub pages_fetched: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial: Option<PartialFailure>,
}

/// Outcome of one source within an aggregated run.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Ok,
    Partial { page: u32, error: String },
    Failed { error: String },
}

/// Per-source entry of a [`NewsPage`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SourceReport {
    pub name: String,
    #[serde(flatten)]
    pub status: SourceStatus,
    pub records: Vec<Record>,
}

impl SourceReport {
    /// Build a report from a finished extraction.
    ///
    /// The status is `Partial` when the run stopped early on a failed page,
    /// `Ok` otherwise.
    pub fn from_result(result: ResultSet) -> Self {
        let status = match result.partial {
            Some(PartialFailure { page, error }) => SourceStatus::Partial { page, error },
            None => SourceStatus::Ok,
        };
        Self {
            name: result.source_name,
            status,
            records: result.records,
        }
    }

    /// A report for a source that produced nothing.
    ///
    /// # Arguments
    ///
    /// * `name` - The source's display name
    /// * `error` - The failure, rendered into the report's `error` field
    pub fn failed(name: impl Into<String>, error: impl ToString) -> Self {
        Self {
            name: name.into(),
            status: SourceStatus::Failed {
                error: error.to_string(),
            },
            records: Vec::new(),
        }
    }
}

/// Aggregated output of one run across all configured sources.
///
/// Sources appear in configuration order regardless of how they were
/// scheduled.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NewsPage {
    pub generated_at: DateTime<Utc>,
    pub sources: Vec<SourceReport>,
}

impl NewsPage {
    pub fn total_records(&self) -> usize {
        self.sources.iter().map(|s| s.records.len()).sum()
    }
}
