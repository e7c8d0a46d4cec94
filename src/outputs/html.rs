//! HTML rendering of a [`NewsPage`].
//!
//! The page is a single self-contained document: inline stylesheet, one
//! section per source, one list entry per record. Every value that came off
//! the network is escaped before it is interpolated.

use crate::errors::RenderError;
use crate::models::{NewsPage, PublishedAt, SourceReport, SourceStatus};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

const STYLE: &str = r#"
body {
    background-color: #f4f4f4;
    margin: 100px 0 0 0;
    padding: 0;
    font-family: 'Arial', sans-serif;
    color: #333;
    display: flex;
    justify-content: center;
    align-items: center;
}
.container {
    background-color: #fff;
    padding: 30px;
    margin: 20px;
    border-radius: 10px;
    width: 80%;
    max-width: 900px;
    box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1);
}
h1 { font-size: 2.5em; text-align: center; color: #111; margin-bottom: 40px; }
h2 { font-size: 1.8em; margin-bottom: 20px; padding-bottom: 8px; border-bottom: 2px solid #333; }
ul { list-style: none; padding-left: 0; margin: 0 0 30px 0; }
li { padding: 15px; border-bottom: 1px solid #ddd; transition: background-color 0.3s ease; }
li:last-child { border-bottom: none; }
li:hover { background-color: #e0e0e0; cursor: pointer; }
a { text-decoration: none; color: #333; font-size: 1.1em; font-weight: 500; display: block; }
a:hover { color: #000; }
.date { font-size: 0.9em; color: #888; }
.notice { color: #a33; font-style: italic; }
"#;

/// Human-readable date: `M/D/YYYY`, or the raw text when unparsed.
pub fn display_date(published_at: &PublishedAt) -> String {
    match published_at {
        PublishedAt::Parsed(dt) => dt.format("%-m/%-d/%Y").to_string(),
        PublishedAt::Unparsed(raw) => raw.clone(),
    }
}

/// Render the full HTML document.
pub fn render_page(page: &NewsPage) -> Result<String, RenderError> {
    let mut html = String::with_capacity(4096 + page.total_records() * 256);

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"UTF-8\" />")?;
    writeln!(
        html,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />"
    )?;
    writeln!(html, "<title>News Scraping</title>")?;
    writeln!(html, "<style>{STYLE}</style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "<div class=\"container\">")?;
    writeln!(html, "<h1>Latest News</h1>")?;

    for source in &page.sources {
        render_source(&mut html, source)?;
    }

    writeln!(html, "</div>")?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    Ok(html)
}

fn render_source(html: &mut String, source: &SourceReport) -> Result<(), RenderError> {
    writeln!(html, "<h2>{}</h2>", encode_text(&source.name))?;

    match &source.status {
        SourceStatus::Ok => {}
        SourceStatus::Partial { page, .. } if *page > 1 => writeln!(
            html,
            "<p class=\"notice\">Showing results up to page {}; later pages could not be loaded.</p>",
            page - 1
        )?,
        SourceStatus::Partial { .. } => {
            writeln!(html, "<p class=\"notice\">This source could not be loaded.</p>")?;
            return Ok(());
        }
        SourceStatus::Failed { .. } => {
            writeln!(html, "<p class=\"notice\">This source could not be loaded.</p>")?;
            return Ok(());
        }
    }

    writeln!(html, "<ul>")?;
    for record in &source.records {
        writeln!(
            html,
            "<li><a href=\"{}\" target=\"_blank\"><span class=\"headline\">{}</span> <span class=\"date\">{}</span></a></li>",
            encode_double_quoted_attribute(record.link.as_str()),
            encode_text(&record.headline),
            encode_text(&display_date(&record.published_at)),
        )?;
    }
    writeln!(html, "</ul>")?;
    Ok(())
}
