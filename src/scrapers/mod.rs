//! Paginated listing scrapers.
//!
//! Every source is described by data ([`SourceSpec`](crate::models::SourceSpec))
//! rather than code, so a single extractor serves all of them:
//!
//! 1. **Fetching**: Request `?page=N` of the listing through a
//!    [`PageFetcher`](crate::fetch::PageFetcher)
//! 2. **Extraction**: Pull headline/link/date out of every item node
//!    ([`page`])
//! 3. **Continuation**: Follow the next-page marker until it disappears
//!    ([`paginated`])
//!
//! # Common Patterns
//!
//! - Pages of one source are fetched strictly one after another
//! - Links are resolved against the source's base URL
//! - Items without a headline or link are logged and skipped

pub mod page;
pub mod paginated;

pub use paginated::{ErrorPolicy, ExtractOptions, extract, page_url, sort_newest_first};
