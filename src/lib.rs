//! # Paged News
//!
//! Scrapes paginated news listings, extracts headline/link/date records,
//! sorts them newest first and renders them as a single HTML page.
//!
//! ## Architecture
//!
//! 1. **Configuration**: Sources are data ([`models::SourceSpec`]) loaded
//!    from YAML ([`config`])
//! 2. **Extraction**: [`scrapers::extract`] walks one source page by page
//!    through a [`fetch::PageFetcher`]
//! 3. **Aggregation**: [`aggregate::scrape_all`] runs every source and
//!    isolates failures per source
//! 4. **Output**: [`outputs`] renders HTML or writes JSON; [`server`] serves
//!    the page over HTTP

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod dates;
pub mod errors;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod server;
pub mod utils;
