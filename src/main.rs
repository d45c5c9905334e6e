//! quakes - Earthquake overview server
//!
//! Fetches USGS earthquake events for a date range once at startup and
//! serves summary pages over HTTP.

mod config;
mod fetch;
mod prompt;
mod quake;
mod service;
mod web;

use config::ServerConfig;
use fetch::{FetchWindow, RecordFetcher};
use quake::{decode_collection, TrailingSegment};
use service::QuakeService;
use web::Server;

use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("quakes=info".parse()?))
        .init();

    // Load configuration
    let cfg = ServerConfig::load();

    // Date range: environment first, then the interactive prompt
    let (start, end) = match cfg.preset_dates() {
        Some((start, end)) => (start.to_string(), end.to_string()),
        None => prompt::prompt_dates(&mut io::stdin().lock(), &mut io::stdout())?,
    };
    let window = FetchWindow::from_local_dates(&start, &end)?;
    tracing::info!("Requesting earthquakes from {} to {}", window.start, window.end);

    // Fetch and decode the feed
    let fetcher = RecordFetcher::new(&cfg.api_url, cfg.fetch_timeout())?;
    let body = fetcher.fetch(&window).await?;
    let collection = decode_collection(&body)?;
    if collection.metadata.count != collection.features.len() {
        tracing::warn!(
            "Feed reports {} events but contains {}",
            collection.metadata.count,
            collection.features.len()
        );
    }

    // Aggregate once; the snapshot is read-only from here on
    let service = Arc::new(QuakeService::new(collection, &TrailingSegment)?);
    let stats = service.get_all().stats;
    tracing::info!(
        "Loaded {} events across {} regions, mean magnitude {:.2}, most affected: {} ({})",
        service.get_all().collection.features.len(),
        stats.regions.len(),
        stats.mean_magnitude,
        stats.top_region_name(),
        stats.top_region_count()
    );

    // Start web server
    tracing::info!("Starting quakes on port {}...", cfg.http_port);
    let server = Server::new(cfg, service);
    server.start().await?;

    Ok(())
}
