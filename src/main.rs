use clap::Parser;
use paged_news::aggregate::scrape_all;
use paged_news::cli::Cli;
use paged_news::config::Config;
use paged_news::outputs::json;
use paged_news::server::{self, AppState};
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("paged_news starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.bind, ?args.json_output_dir, "Parsed CLI arguments");

    let mut config = match &args.config {
        Some(path) => Config::load(path).inspect_err(|e| {
            error!(%path, error = %e, "Failed to load configuration");
        })?,
        None => {
            info!("No config file given; using built-in sources");
            Config::default()
        }
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let state = AppState::new(config)?;

    // ---- One-shot mode ----
    if let Some(dir) = args.json_output_dir.as_deref() {
        let page = scrape_all(&state.fetcher, &state.config).await;
        let path = json::write_news_page(&page, dir).await?;

        let elapsed = start_time.elapsed();
        info!(
            path = %path.display(),
            records = page.total_records(),
            secs = elapsed.as_secs(),
            millis = elapsed.subsec_millis(),
            "Execution complete"
        );
        return Ok(());
    }

    // ---- Server mode ----
    let addr = state.config.bind_addr.clone();
    server::serve(state, &addr).await
}
