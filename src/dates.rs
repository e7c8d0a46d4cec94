//! Pluggable per-source date parsing.
//!
//! Listing pages print publication dates in whatever format the site likes
//! (`Oct. 18, 2024`, `2024-10-18`, `Fri, 18 Oct 2024 09:00:00 GMT`, ...).
//! A [`DateStrategy`] normalises the raw text and tries a list of formats,
//! returning [`PublishedAt::Unparsed`] instead of a bogus value when none
//! match.

use crate::models::PublishedAt;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Formats tried when a source does not configure its own.
pub const DEFAULT_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d, %Y", "%B %d, %Y"];

/// How to turn a source's raw date text into a point in time.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DateStrategy {
    /// Every character in this string is removed before parsing
    /// (e.g. `"."` turns `Oct. 18, 2024` into `Oct 18, 2024`).
    pub remove: String,
    /// `strftime` formats tried in order after RFC 3339 and RFC 2822.
    /// Date-only formats resolve to midnight UTC.
    pub formats: Vec<String>,
}

impl Default for DateStrategy {
    fn default() -> Self {
        Self {
            remove: String::new(),
            formats: DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl DateStrategy {
    /// Build a strategy from borrowed format strings.
    ///
    /// # Arguments
    ///
    /// * `remove` - Characters stripped from the raw date before parsing
    /// * `formats` - chrono `strftime` patterns, tried in order after RFC 3339 and RFC 2822
    pub fn new(remove: impl Into<String>, formats: &[&str]) -> Self {
        Self {
            remove: remove.into(),
            formats: formats.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Parse raw date text, never failing: unknown formats become
    /// [`PublishedAt::Unparsed`] carrying the trimmed original text.
    pub fn parse(&self, raw: &str) -> PublishedAt {
        let raw = raw.trim();
        let cleaned: String = raw
            .chars()
            .filter(|c| !self.remove.contains(*c))
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match self.parse_cleaned(&cleaned) {
            Some(dt) => PublishedAt::Parsed(dt),
            None => {
                trace!(raw, cleaned = %cleaned, "Unrecognized date format");
                PublishedAt::Unparsed(raw.to_string())
            }
        }
    }

    fn parse_cleaned(&self, s: &str) -> Option<DateTime<Utc>> {
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
            return Some(dt.with_timezone(&Utc));
        }

        for format in &self.formats {
            if let Ok(ndt) = NaiveDateTime::parse_from_str(s, format) {
                return Some(ndt.and_utc());
            }
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return date.and_hms_opt(0, 0, 0).map(|ndt| ndt.and_utc());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn midnight(y: i32, m: u32, d: u32) -> PublishedAt {
        PublishedAt::Parsed(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_iso_date_with_defaults() {
        let strategy = DateStrategy::default();
        assert_eq!(strategy.parse("2024-01-03"), midnight(2024, 1, 3));
    }

    #[test]
    fn test_rfc3339_is_always_tried() {
        let strategy = DateStrategy::new("", &[]);
        assert_eq!(
            strategy.parse("2024-01-03T10:30:00+02:00"),
            PublishedAt::Parsed(Utc.with_ymd_and_hms(2024, 1, 3, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_rfc2822() {
        let strategy = DateStrategy::default();
        assert_eq!(
            strategy.parse("Fri, 18 Oct 2024 09:00:00 GMT"),
            PublishedAt::Parsed(Utc.with_ymd_and_hms(2024, 10, 18, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_abbreviated_month_with_removed_dot() {
        let strategy = DateStrategy::new(".", &["%b %d, %Y"]);
        assert_eq!(strategy.parse("  Oct. 18, 2024 \n"), midnight(2024, 10, 18));
    }

    #[test]
    fn test_dot_breaks_parsing_when_not_removed() {
        let strategy = DateStrategy::new("", &["%b %d, %Y"]);
        assert_eq!(
            strategy.parse("Oct. 18, 2024"),
            PublishedAt::Unparsed("Oct. 18, 2024".to_string())
        );
    }

    #[test]
    fn test_datetime_format() {
        let strategy = DateStrategy::new("", &["%d/%m/%Y %H:%M"]);
        assert_eq!(
            strategy.parse("18/10/2024 14:05"),
            PublishedAt::Parsed(Utc.with_ymd_and_hms(2024, 10, 18, 14, 5, 0).unwrap())
        );
    }

    #[test]
    fn test_empty_and_garbage_are_unparsed() {
        let strategy = DateStrategy::default();
        assert_eq!(strategy.parse("   "), PublishedAt::Unparsed(String::new()));
        assert_eq!(
            strategy.parse("2 hours ago"),
            PublishedAt::Unparsed("2 hours ago".to_string())
        );
    }

    #[test]
    fn test_strategy_from_partial_yaml() {
        let strategy: DateStrategy = serde_yaml::from_str("remove: \".\"").unwrap();
        assert_eq!(strategy.remove, ".");
        assert_eq!(strategy.formats.len(), DEFAULT_FORMATS.len());
    }
}
