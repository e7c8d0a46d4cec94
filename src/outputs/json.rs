//! JSON output of a scrape run.
//!
//! # Output Structure
//!
//! Files are organized by the UTC date of the run:
//! ```text
//! json_output_dir/
//! └── 2024-01-03/
//!     ├── 081500.json
//!     └── 201500.json
//! ```

use crate::models::NewsPage;
use crate::utils::ensure_writable_dir;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Path of the JSON file for `page` under `json_output_dir`.
pub fn output_path(page: &NewsPage, json_output_dir: &str) -> PathBuf {
    PathBuf::from(json_output_dir)
        .join(page.generated_at.format("%Y-%m-%d").to_string())
        .join(format!("{}.json", page.generated_at.format("%H%M%S")))
}

/// Write a [`NewsPage`] to a JSON file with date-based directory structure.
///
/// # Returns
///
/// The path written, or an error if directory creation or file writing fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_news_page(
    page: &NewsPage,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(page)?;
    let path = output_path(page, json_output_dir);

    if let Some(dir) = path.parent() {
        let dir = dir.to_string_lossy();
        if let Err(e) = ensure_writable_dir(&dir).await {
            error!(%dir, error = %e, "JSON directory is not writable");
            return Err(e);
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), records = page.total_records(), "Wrote JSON file");
    Ok(path)
}
