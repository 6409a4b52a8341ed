//! Newsdesk home-page snapshot
//!
//! Loads configuration, wires the dashboard against the configured backend
//! and logs what the public landing page would show: the featured article,
//! the trending tags and the first page of the approved feed.
//!
//! Usage: `newsdesk-dashboard [CONFIG_FILE]`

use newsdesk_common::{config::AppConfig, metrics, telemetry};
use newsdesk_dashboard::Dashboard;
use tracing::{error, info, warn};

const FEED_PAGE_SIZE: u32 = 10;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // An explicit config file replaces the default lookup chain
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_file(&path)?,
        None => AppConfig::load()?,
    };
    telemetry::init(&config.observability);

    info!("Starting Newsdesk dashboard v{}", newsdesk_common::VERSION);
    metrics::register_metrics();

    let dashboard = Dashboard::from_config(&config).map_err(|e| {
        error!(error = %e, "Failed to build API client");
        e
    })?;

    match dashboard.articles.featured().await {
        Ok(Some(article)) => info!(article_id = article.id, title = %article.title, "Featured"),
        Ok(None) => info!("No approved article to feature"),
        Err(e) => warn!(error = %e, "Featured article unavailable"),
    }

    let tags = dashboard.tags.trending().await;
    info!(tags = ?tags, "Trending");

    match dashboard.articles.latest(None, FEED_PAGE_SIZE).await {
        Ok(page) => info!(
            shown = page.items.len(),
            has_next = page.has_next,
            next_cursor = ?page.next_cursor,
            "Latest feed"
        ),
        Err(e) => warn!(error = %e, code = e.code().as_code(), "Latest feed unavailable"),
    }

    Ok(())
}
