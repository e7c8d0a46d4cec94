//! Error taxonomy for fetching, parsing and configuration.

use thiserror::Error;

/// Network or transport failure while fetching one listing page.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("http error {status}")]
    Status { status: reqwest::StatusCode },

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// Classify a reqwest error.
    ///
    /// # Returns
    ///
    /// `Timeout`, `Status`, `Connect` or `Body` when reqwest says so, and
    /// `Request` for everything else.
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Status { status }
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Markup could not be evaluated against a source's selectors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

/// Failure of one source's extraction run.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ExtractError {
    /// The page being processed when the error occurred, if known.
    pub fn page(&self) -> Option<u32> {
        match self {
            ExtractError::Fetch { page, .. } => Some(*page),
            ExtractError::Parse(_) => None,
        }
    }
}

/// Configuration could not be loaded or is unusable.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// The HTML page could not be assembled.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to format page: {0}")]
    Format(#[from] std::fmt::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display_includes_page() {
        let err = ExtractError::Fetch {
            page: 2,
            source: FetchError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
            },
        };
        assert_eq!(err.to_string(), "page 2: http error 502 Bad Gateway");
        assert_eq!(err.page(), Some(2));
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let err = ExtractError::from(ParseError::Selector {
            selector: "li[".to_string(),
            reason: "unexpected end".to_string(),
        });
        assert_eq!(err.to_string(), "invalid selector `li[`: unexpected end");
        assert_eq!(err.page(), None);
    }
}
