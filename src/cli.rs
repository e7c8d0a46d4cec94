//! Command-line interface definitions for Paged News.
//!
//! All arguments can be provided via command-line flags or environment variables.

use clap::Parser;

/// Command-line arguments for the Paged News application.
///
/// Without `--json-output-dir` the application serves the rendered page over
/// HTTP; with it, the application scrapes once, writes JSON and exits.
///
/// # Examples
///
/// ```sh
/// # Serve the built-in source on the default address
/// paged_news
///
/// # Serve sources from a config file on another port
/// paged_news -c sources.yaml -b 0.0.0.0:8080
///
/// # Scrape once and write JSON
/// paged_news -c sources.yaml -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "PAGED_NEWS_CONFIG")]
    pub config: Option<String>,

    /// Address to bind the HTTP server to (overrides the config file)
    #[arg(short, long, env = "PAGED_NEWS_BIND")]
    pub bind: Option<String>,

    /// Scrape once into this directory instead of serving
    #[arg(short, long)]
    pub json_output_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["paged_news"]);
        assert!(cli.json_output_dir.is_none());
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "paged_news",
            "--config",
            "sources.yaml",
            "--bind",
            "0.0.0.0:8080",
        ]);

        assert_eq!(cli.config.as_deref(), Some("sources.yaml"));
        assert_eq!(cli.bind.as_deref(), Some("0.0.0.0:8080"));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["paged_news", "-c", "/etc/news.yaml", "-j", "/tmp/json"]);

        assert_eq!(cli.config.as_deref(), Some("/etc/news.yaml"));
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
    }
}
