//! HTTP front end.
//!
//! Every request to `/` or `/api/news` runs a fresh scrape of all
//! configured sources; nothing is cached between requests.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | Rendered HTML page |
//! | `GET /api/news` | [`NewsPage`] as JSON |
//! | `GET /healthz` | `{"status":"OK"}` |
//!
//! When the page cannot be produced the response is a 500 with
//! `{"error":"Failed to scrape news data"}`.

use crate::aggregate::scrape_all;
use crate::config::Config;
use crate::fetch::HttpFetcher;
use crate::models::NewsPage;
use crate::outputs::html::render_page;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use std::error::Error;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fetcher: HttpFetcher,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, Box<dyn Error>> {
        let fetcher = HttpFetcher::new(&config.user_agent, config.request_timeout())?;
        Ok(Self {
            config: Arc::new(config),
            fetcher,
        })
    }
}

/// Response for any failure to build the news page.
#[derive(Debug)]
pub struct ScrapeFailure;

impl IntoResponse for ScrapeFailure {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to scrape news data" })),
        )
            .into_response()
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
}

/// Build the application router.
///
/// # Arguments
///
/// * `state` - Config and fetcher shared by every handler
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(news_page))
        .route("/api/news", get(news_json))
        .route("/healthz", get(health_check))
        .with_state(state)
}

#[instrument(level = "info", skip_all)]
async fn news_page(State(state): State<AppState>) -> Result<Html<String>, ScrapeFailure> {
    let t0 = Instant::now();
    let page = scrape_all(&state.fetcher, &state.config).await;
    let html = render_page(&page).map_err(|e| {
        error!(error = %e, "Failed to render news page");
        ScrapeFailure
    })?;
    info!(
        records = page.total_records(),
        bytes = html.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Served news page"
    );
    Ok(Html(html))
}

#[instrument(level = "info", skip_all)]
async fn news_json(State(state): State<AppState>) -> Json<NewsPage> {
    Json(scrape_all(&state.fetcher, &state.config).await)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> Result<(), Box<dyn Error>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Server is running");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
