//! Paginated listing extraction.
//!
//! [`extract`] walks a source page by page: fetch `?page=N`, pull records
//! out of the markup, and continue only while the current page advertises
//! page `N + 1`. Pages are fetched strictly in order because the stop
//! condition of page N is only known once page N has been parsed.
//!
//! # Error policy
//!
//! A failed fetch ends the run for that source. With [`ErrorPolicy::Discard`]
//! everything gathered so far is dropped and the error is returned; with
//! [`ErrorPolicy::Partial`] the records of the pages already fetched are
//! returned together with a [`PartialFailure`].

use crate::errors::ExtractError;
use crate::fetch::PageFetcher;
use crate::models::{PartialFailure, Record, ResultSet, SourceSpec};
use crate::scrapers::page::CompiledSource;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Name of the query parameter carrying the page number.
pub const PAGE_PARAM: &str = "page";

/// What happens to already gathered records when a later page fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Drop everything for the source and report the error.
    #[default]
    Discard,
    /// Keep the records of the pages fetched before the failure.
    Partial,
}

/// Per-run knobs of [`extract`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub on_error: ErrorPolicy,
    /// Stop after this many pages even if more are advertised.
    pub max_pages: Option<u32>,
}

/// `base` with `page=<page>` as its only page parameter.
///
/// Other query pairs are kept in order; any `page` already present in
/// `base` is replaced.
pub fn page_url(base: &Url, page: u32) -> Url {
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(k, _)| k != PAGE_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut url = base.clone();
    url.set_query(None);
    url.query_pairs_mut()
        .extend_pairs(kept)
        .append_pair(PAGE_PARAM, &page.to_string());
    url
}

/// Stable sort, newest first, unparsable dates last.
pub fn sort_newest_first(records: Vec<Record>) -> Vec<Record> {
    records
        .into_iter()
        .sorted_by(|a, b| b.published_at.chronological_cmp(&a.published_at))
        .collect()
}

/// Fetch and extract every page of `source`.
///
/// Issues one fetch per page until the pagination marker for the next page
/// is missing (or `max_pages` is reached) and returns the records of all
/// pages sorted newest first.
///
/// # Errors
///
/// - [`ExtractError::Parse`] if one of the source's selectors is malformed;
///   nothing is fetched in that case.
/// - [`ExtractError::Fetch`] if a page fails and the policy is
///   [`ErrorPolicy::Discard`].
#[instrument(level = "info", skip_all, fields(source = %source.name))]
pub async fn extract<F>(
    fetcher: &F,
    source: &SourceSpec,
    options: ExtractOptions,
) -> Result<ResultSet, ExtractError>
where
    F: PageFetcher,
{
    let compiled = CompiledSource::compile(source)?;
    let mut records = Vec::new();
    let mut page = 1u32;
    let mut pages_fetched = 0u32;

    loop {
        let url = page_url(&source.base_url, page);
        debug!(page, %url, "Fetching page");

        let body = match fetcher.fetch_page(&url).await {
            Ok(body) => body,
            Err(e) => {
                let err = ExtractError::Fetch { page, source: e };
                return match options.on_error {
                    ErrorPolicy::Discard => {
                        warn!(page, discarded = records.len(), error = %err, "Page failed; discarding source results");
                        Err(err)
                    }
                    ErrorPolicy::Partial => {
                        warn!(page, kept = records.len(), error = %err, "Page failed; keeping partial results");
                        Ok(ResultSet {
                            source_name: source.name.clone(),
                            records: sort_newest_first(records),
                            pages_fetched,
                            partial: Some(PartialFailure {
                                page: err.page().unwrap_or(page),
                                error: err.to_string(),
                            }),
                        })
                    }
                };
            }
        };
        pages_fetched += 1;

        let extracted = compiled.parse_page(&body, page);
        records.extend(extracted.records);

        if !extracted.has_next {
            debug!(page, "No more pages to load");
            break;
        }
        if options.max_pages.is_some_and(|max| page >= max) {
            warn!(page, "Page cap reached before the listing was exhausted");
            break;
        }
        page += 1;
    }

    let records = sort_newest_first(records);
    info!(pages = pages_fetched, count = records.len(), "Extracted source");
    Ok(ResultSet {
        source_name: source.name.clone(),
        records,
        pages_fetched,
        partial: None,
    })
}
