//! Fetching of raw event data from the upstream feed.

mod http;

pub use http::*;

use crate::quake::{normalize_date, DateError};

use std::time::Duration;
use thiserror::Error;

/// Fetch error types.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// The time window requested from the feed, in `yyyy-mm-dd` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: String,
    pub end: String,
}

impl FetchWindow {
    /// Build a window from two `dd.mm.yyyy` dates.
    pub fn from_local_dates(start: &str, end: &str) -> Result<Self, DateError> {
        Ok(Self {
            start: normalize_date(start)?,
            end: normalize_date(end)?,
        })
    }

    /// Query parameters for this window.
    pub fn query(&self) -> String {
        format!("starttime={}&endtime={}", self.start, self.end)
    }
}
