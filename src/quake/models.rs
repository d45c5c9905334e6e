//! Earthquake feed model types.
//!
//! Mirrors the GeoJSON summary format of the USGS event API. Every field
//! tolerates being absent or `null` and falls back to its zero value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A loosely typed scientific attribute (`felt`, `cdi`, `mmi`, `alert`).
///
/// The feed sends these as numbers, strings or `null` depending on the event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Collection-level metadata as reported upstream.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Generation time in epoch milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub generated: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: u16,
    #[serde(deserialize_with = "null_as_default")]
    pub api: String,
    /// Event count claimed by the feed. Not trusted for aggregation.
    #[serde(deserialize_with = "null_as_default")]
    pub count: usize,
}

impl Metadata {
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.generated)
    }
}

/// Per-event properties.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Properties {
    pub mag: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub place: String,
    /// Origin time in epoch milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub updated: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub tz: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub detail: String,
    pub felt: Option<Measure>,
    pub cdi: Option<Measure>,
    pub mmi: Option<Measure>,
    pub alert: Option<Measure>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tsunami: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub sig: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub net: String,
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ids: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sources: String,
    #[serde(deserialize_with = "null_as_default")]
    pub types: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nst: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub dmin: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub rms: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub gap: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub mag_type: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
}

/// Point geometry: `[longitude, latitude, depth]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Geometry {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub coordinates: Vec<f64>,
}

impl Geometry {
    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.first().copied()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.get(1).copied()
    }

    /// Depth in kilometers.
    pub fn depth(&self) -> Option<f64> {
        self.coordinates.get(2).copied()
    }
}

/// A single earthquake (one feed "feature").
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub properties: Properties,
    #[serde(deserialize_with = "null_as_default")]
    pub geometry: Geometry,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
}

impl Event {
    pub fn place(&self) -> &str {
        &self.properties.place
    }

    pub fn magnitude(&self) -> Option<f64> {
        self.properties.mag
    }

    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.properties.time)
    }
}

/// A decoded feed: metadata plus the ordered event list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventCollection {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(deserialize_with = "null_as_default")]
    pub features: Vec<Event>,
    #[serde(deserialize_with = "null_as_default")]
    pub bbox: Vec<f64>,
}

impl EventCollection {
    /// `[latitude, longitude]` of every event that has both.
    pub fn coordinates(&self) -> Vec<[f64; 2]> {
        self.features
            .iter()
            .filter_map(|e| Some([e.geometry.latitude()?, e.geometry.longitude()?]))
            .collect()
    }
}
