//! HTTP fetch against the event query endpoint.

use super::{FetchError, FetchWindow};
use std::time::{Duration, Instant};

/// Longest slice of an error body kept in [`FetchError::Status`].
const MAX_ERROR_BODY: usize = 200;

/// Append the window's query parameters to `base_url`.
///
/// `base_url` is expected to already end with its query separator
/// (`?` or `&`).
pub fn build_query_url(base_url: &str, window: &FetchWindow) -> String {
    format!("{}{}", base_url, window.query())
}

/// Issues the single upstream request for a time window.
#[derive(Debug, Clone)]
pub struct RecordFetcher {
    client: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl RecordFetcher {
    /// Create a fetcher for `base_url`. A `None` timeout keeps the client default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            timeout,
        })
    }

    /// Fetch the raw feed body for `window`.
    ///
    /// A single attempt is made; transport failures and non-success statuses
    /// are returned as errors.
    pub async fn fetch(&self, window: &FetchWindow) -> Result<Vec<u8>, FetchError> {
        let url = build_query_url(&self.base_url, window);
        tracing::info!("Fetching earthquakes from {}", url);

        let start = Instant::now();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate(body.trim(), MAX_ERROR_BODY),
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        tracing::info!(
            "Fetched {} bytes in {:.2}s",
            body.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(body.to_vec())
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        match self.timeout {
            Some(timeout) if e.is_timeout() => FetchError::Timeout(timeout),
            _ => FetchError::Network(e.to_string()),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
