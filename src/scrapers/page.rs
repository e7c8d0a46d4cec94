//! Single-page field extraction.
//!
//! A [`CompiledSource`] holds the parsed selectors of one [`SourceSpec`] and
//! turns one page of markup into records plus the "is there a next page"
//! signal. Everything here is synchronous: the parsed document is dropped
//! before the caller awaits its next fetch.

use crate::errors::ParseError;
use crate::models::{FieldSelector, PublishedAt, Record, SourceSpec};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const DEFAULT_LINK_ATTRIBUTE: &str = "href";

/// Records and pagination signal found on one page.
#[derive(Debug, Default)]
pub struct PageExtract {
    pub records: Vec<Record>,
    /// Whether the page advertises the page after it.
    pub has_next: bool,
    /// Item nodes matched by the item selector.
    pub items_seen: usize,
}

/// Selectors of a source, parsed once per extraction run.
#[derive(Debug)]
pub struct CompiledSource<'a> {
    spec: &'a SourceSpec,
    item: Selector,
    headline: Selector,
    link: Selector,
    date: Selector,
    pagination: Selector,
}

fn compile(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Collapse runs of whitespace and trim, like a browser renders text.
pub fn normalize_text(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

impl<'a> CompiledSource<'a> {
    pub fn compile(spec: &'a SourceSpec) -> Result<Self, ParseError> {
        Ok(Self {
            spec,
            item: compile(&spec.item_selector)?,
            headline: compile(&spec.fields.headline.selector)?,
            link: compile(&spec.fields.link.selector)?,
            date: compile(&spec.fields.date.selector)?,
            pagination: compile(&spec.pagination.selector)?,
        })
    }

    /// Extract every valid record of `html` and check for the marker of
    /// page `page + 1`.
    pub fn parse_page(&self, html: &str, page: u32) -> PageExtract {
        let document = Html::parse_document(html);
        let mut extract = PageExtract::default();

        for item in document.select(&self.item) {
            extract.items_seen += 1;
            if let Some(record) = self.extract_record(item) {
                extract.records.push(record);
            }
        }

        extract.has_next = self.has_page(&document, page + 1);
        debug!(
            page,
            items = extract.items_seen,
            records = extract.records.len(),
            has_next = extract.has_next,
            "Parsed page"
        );
        extract
    }

    fn extract_record(&self, item: ElementRef<'_>) -> Option<Record> {
        let fields = &self.spec.fields;

        let headline = read_field(item, &self.headline, &fields.headline)
            .map(|h| normalize_text(&h))
            .unwrap_or_default();
        if headline.is_empty() {
            trace!("Skipping item without headline");
            return None;
        }

        let attribute = fields
            .link
            .attribute
            .as_deref()
            .unwrap_or(DEFAULT_LINK_ATTRIBUTE);
        let href = item
            .select(&self.link)
            .find_map(|el| el.value().attr(attribute))
            .map(str::trim)
            .filter(|href| !href.is_empty());
        let link = match href.map(|href| self.spec.base_url.join(href)) {
            Some(Ok(link)) => link,
            Some(Err(e)) => {
                debug!(%headline, error = %e, "Skipping item with unresolvable link");
                return None;
            }
            None => {
                debug!(%headline, "Skipping item without link");
                return None;
            }
        };

        let published_at = match read_field(item, &self.date, &fields.date) {
            Some(raw) => self.spec.date.parse(&raw),
            None => PublishedAt::Unparsed(String::new()),
        };

        Some(Record {
            headline,
            link,
            published_at,
        })
    }

    fn has_page(&self, document: &Html, page: u32) -> bool {
        let wanted = page.to_string();
        let attribute = self.spec.pagination.attribute.as_str();
        document
            .select(&self.pagination)
            .any(|el| el.value().attr(attribute).map(str::trim) == Some(wanted.as_str()))
    }
}

/// Text or attribute value of the first node under `item` matching `selector`.
fn read_field(item: ElementRef<'_>, selector: &Selector, field: &FieldSelector) -> Option<String> {
    let node = item.select(selector).next()?;
    match &field.attribute {
        Some(attribute) => node.value().attr(attribute).map(str::to_string),
        None => Some(node.text().collect::<String>()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateStrategy;
    use crate::models::{FieldSelectors, PaginationMarker};
    use chrono::{TimeZone, Utc};
    use url::Url;

    fn spec(base: &str) -> SourceSpec {
        SourceSpec {
            name: "Test".to_string(),
            base_url: Url::parse(base).unwrap(),
            item_selector: "article".to_string(),
            fields: FieldSelectors {
                headline: FieldSelector::text("h2"),
                link: FieldSelector::text("a"),
                date: FieldSelector::attr("time", "datetime"),
            },
            pagination: PaginationMarker {
                selector: "nav a.page".to_string(),
                attribute: "data-page".to_string(),
            },
            date: DateStrategy::default(),
        }
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Big\n\t  news   today "), "Big news today");
        assert_eq!(normalize_text(" \n "), "");
    }

    #[test]
    fn test_extracts_fields_and_defaults_link_to_href() {
        let spec = spec("https://example.test/news/");
        let compiled = CompiledSource::compile(&spec).unwrap();
        let html = r#"
            <article>
              <h2>
                Rust 2.0
                announced
              </h2>
              <a href="rust-2">read</a>
              <time datetime="2024-03-01T08:00:00Z">March 1</time>
            </article>
            <nav><a class="page" data-page="2">2</a></nav>
        "#;

        let extract = compiled.parse_page(html, 1);
        assert_eq!(extract.items_seen, 1);
        assert!(extract.has_next);
        let record = &extract.records[0];
        assert_eq!(record.headline, "Rust 2.0 announced");
        assert_eq!(record.link.as_str(), "https://example.test/news/rust-2");
        assert_eq!(
            record.published_at,
            PublishedAt::Parsed(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_root_relative_link_ignores_base_path() {
        let spec = spec("https://example.test/news/");
        let compiled = CompiledSource::compile(&spec).unwrap();
        let html = r#"<article><h2>A</h2><a href="/2024/a">a</a></article>"#;

        let extract = compiled.parse_page(html, 1);
        assert_eq!(extract.records[0].link.as_str(), "https://example.test/2024/a");
    }

    #[test]
    fn test_items_without_link_or_headline_are_skipped() {
        let spec = spec("https://example.test/");
        let compiled = CompiledSource::compile(&spec).unwrap();
        let html = r#"
            <article><h2>No link here</h2></article>
            <article><h2>Empty href</h2><a href="  ">x</a></article>
            <article><h2>   </h2><a href="/blank">x</a></article>
            <article><h2>Kept</h2><a href="/kept">x</a></article>
        "#;

        let extract = compiled.parse_page(html, 1);
        assert_eq!(extract.items_seen, 4);
        assert_eq!(extract.records.len(), 1);
        assert_eq!(extract.records[0].headline, "Kept");
    }

    #[test]
    fn test_missing_date_is_unparsed() {
        let spec = spec("https://example.test/");
        let compiled = CompiledSource::compile(&spec).unwrap();
        let html = r#"<article><h2>Undated</h2><a href="/u">u</a></article>"#;

        let extract = compiled.parse_page(html, 1);
        assert_eq!(
            extract.records[0].published_at,
            PublishedAt::Unparsed(String::new())
        );
    }

    #[test]
    fn test_marker_must_name_the_next_page() {
        let spec = spec("https://example.test/");
        let compiled = CompiledSource::compile(&spec).unwrap();
        let html = r#"<nav><a class="page" data-page="1">1</a><a class="page" data-page="3">3</a></nav>"#;

        assert!(!compiled.parse_page(html, 1).has_next);
        assert!(compiled.parse_page(html, 2).has_next);
    }

    #[test]
    fn test_invalid_selector_is_parse_error() {
        let mut spec = spec("https://example.test/");
        spec.item_selector = "li[".to_string();

        match CompiledSource::compile(&spec) {
            Err(ParseError::Selector { selector, .. }) => assert_eq!(selector, "li["),
            other => panic!("expected selector error, got {other:?}"),
        }
    }
}
