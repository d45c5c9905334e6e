//! Configuration module for the quakes server.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

/// Default USGS query endpoint, ending in its query separator.
pub const DEFAULT_API_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query?format=geojson&";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the web server (default: 8080)
    pub http_port: u16,
    /// Event query endpoint, including the trailing `&` or `?`
    pub api_url: String,
    /// Upstream fetch timeout in seconds; 0 keeps the HTTP client default (default: 30)
    pub fetch_timeout_secs: u64,
    /// Start date in `dd.mm.yyyy` form; prompted for when unset
    pub start_date: Option<String>,
    /// End date in `dd.mm.yyyy` form; prompted for when unset
    pub end_date: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            api_url: DEFAULT_API_URL.to_string(),
            fetch_timeout_secs: 30,
            start_date: None,
            end_date: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `QUAKES_HTTP_PORT`: HTTP port (default: 8080)
    /// - `QUAKES_API_URL`: event query endpoint (default: USGS GeoJSON query)
    /// - `QUAKES_FETCH_TIMEOUT_SECS`: fetch timeout, 0 for none (default: 30)
    /// - `QUAKES_START_DATE` / `QUAKES_END_DATE`: date range in `dd.mm.yyyy`
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(port_str) = lookup("QUAKES_HTTP_PORT") {
            match port_str.parse() {
                Ok(port) => cfg.http_port = port,
                Err(_) => tracing::warn!("Ignoring invalid QUAKES_HTTP_PORT {:?}", port_str),
            }
        }

        if let Some(api_url) = lookup("QUAKES_API_URL") {
            cfg.api_url = api_url;
        }

        if let Some(timeout_str) = lookup("QUAKES_FETCH_TIMEOUT_SECS") {
            match timeout_str.parse() {
                Ok(secs) => cfg.fetch_timeout_secs = secs,
                Err(_) => tracing::warn!(
                    "Ignoring invalid QUAKES_FETCH_TIMEOUT_SECS {:?}",
                    timeout_str
                ),
            }
        }

        cfg.start_date = lookup("QUAKES_START_DATE").filter(|s| !s.trim().is_empty());
        cfg.end_date = lookup("QUAKES_END_DATE").filter(|s| !s.trim().is_empty());

        cfg
    }

    /// Fetch timeout, or `None` when disabled.
    pub fn fetch_timeout(&self) -> Option<Duration> {
        (self.fetch_timeout_secs > 0).then(|| Duration::from_secs(self.fetch_timeout_secs))
    }

    /// Preset date range, if both ends are configured.
    pub fn preset_dates(&self) -> Option<(&str, &str)> {
        Some((self.start_date.as_deref()?, self.end_date.as_deref()?))
    }
}
