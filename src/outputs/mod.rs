//! Output generation for scraped news.
//!
//! # Submodules
//!
//! - [`html`]: Renders a `NewsPage` as a self-contained HTML document
//! - [`json`]: Writes a `NewsPage` to a dated JSON file

pub mod html;
pub mod json;
