//! Run every configured source and collect the results.
//!
//! Errors stop at the per-source boundary: a failed source is logged and
//! reported as [`SourceStatus::Failed`](crate::models::SourceStatus) with no
//! records, and the remaining sources are still scraped.

use crate::config::Config;
use crate::fetch::PageFetcher;
use crate::models::{NewsPage, SourceReport, SourceSpec};
use crate::scrapers::{ExtractOptions, extract};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{error, info, instrument};

/// Scrape one source, converting any failure into a failed report.
pub async fn scrape_source<F>(fetcher: &F, source: &SourceSpec, options: ExtractOptions) -> SourceReport
where
    F: PageFetcher,
{
    match extract(fetcher, source, options).await {
        Ok(result) => SourceReport::from_result(result),
        Err(e) => {
            error!(source = %source.name, error = %e, "Error scraping source");
            SourceReport::failed(&source.name, e)
        }
    }
}

/// Scrape all sources of `config`.
///
/// At most `config.source_concurrency` sources run at once; reports come
/// back in configuration order.
#[instrument(level = "info", skip_all, fields(sources = config.sources.len()))]
pub async fn scrape_all<F>(fetcher: &F, config: &Config) -> NewsPage
where
    F: PageFetcher,
{
    let options = config.extract_options();
    let concurrency = config.source_concurrency.max(1);

    let pending: Vec<_> = config
        .sources
        .iter()
        .map(|source| scrape_source(fetcher, source, options))
        .collect();
    let sources: Vec<SourceReport> = stream::iter(pending)
        .buffered(concurrency)
        .collect()
        .await;

    let page = NewsPage {
        generated_at: Utc::now(),
        sources,
    };
    info!(records = page.total_records(), "Scraped all sources");
    page
}
