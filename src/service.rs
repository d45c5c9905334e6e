//! Read-only access to the aggregated dataset.

use crate::quake::{AggregateStats, Event, EventCollection, Metadata, RegionExtractor, StatsError};

/// The full dataset and its statistics.
#[derive(Debug, Clone, Copy)]
pub struct Overview<'a> {
    pub collection: &'a EventCollection,
    pub stats: &'a AggregateStats,
}

/// Events of a single region, sharing the full dataset's statistics.
#[derive(Debug, Clone)]
pub struct RegionFilteredView<'a> {
    pub metadata: &'a Metadata,
    /// Full-dataset statistics with `selected_region` set.
    pub stats: AggregateStats,
    pub events: Vec<&'a Event>,
}

impl RegionFilteredView<'_> {
    pub fn selected_region(&self) -> &str {
        self.stats.selected_region.as_deref().unwrap_or("")
    }
}

/// Immutable snapshot of one fetch, built before the server starts.
#[derive(Debug)]
pub struct QuakeService {
    collection: EventCollection,
    /// Derived region of each event, index-aligned with `collection.features`.
    regions: Vec<String>,
    stats: AggregateStats,
}

impl QuakeService {
    /// Derive regions and statistics for `collection`.
    pub fn new(
        collection: EventCollection,
        extractor: &dyn RegionExtractor,
    ) -> Result<Self, StatsError> {
        let stats = AggregateStats::compute(&collection, extractor)?;
        let regions = collection
            .features
            .iter()
            .map(|e| extractor.region(e.place()).to_string())
            .collect();

        Ok(Self {
            collection,
            regions,
            stats,
        })
    }

    pub fn get_all(&self) -> Overview<'_> {
        Overview {
            collection: &self.collection,
            stats: &self.stats,
        }
    }

    /// Events whose derived region equals `region` exactly.
    ///
    /// An unknown region yields an empty view.
    pub fn get_by_region(&self, region: &str) -> RegionFilteredView<'_> {
        let events = self
            .collection
            .features
            .iter()
            .zip(&self.regions)
            .filter(|(_, r)| r.as_str() == region)
            .map(|(e, _)| e)
            .collect();

        RegionFilteredView {
            metadata: &self.collection.metadata,
            stats: AggregateStats {
                selected_region: Some(region.to_string()),
                ..self.stats.clone()
            },
            events,
        }
    }

    /// Derived region of the event at `index` in the feed.
    pub fn region_at(&self, index: usize) -> Option<&str> {
        self.regions.get(index).map(String::as_str)
    }

    /// `[latitude, longitude]` points for every located event.
    pub fn coordinates(&self) -> Vec<[f64; 2]> {
        self.collection.coordinates()
    }
}
