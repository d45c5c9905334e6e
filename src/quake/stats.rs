//! Aggregate statistics over a decoded feed.

use super::models::{Event, EventCollection};
use super::region::RegionExtractor;

use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Aggregation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StatsError {
    #[error("no earthquakes in the requested time window")]
    EmptyDataset,
}

/// Summary values computed once over the whole feed.
#[derive(Debug, Clone, Default)]
pub struct AggregateStats {
    pub mean_magnitude: f64,
    /// Events per region, ordered by region name.
    pub region_counts: BTreeMap<String, usize>,
    /// Region with the most events and its count.
    pub top_region: Option<(String, usize)>,
    /// Distinct regions in first-seen order.
    pub regions: Vec<String>,
    /// Region a filtered view was requested for.
    pub selected_region: Option<String>,
}

impl AggregateStats {
    /// Compute all statistics for `collection`.
    ///
    /// Averages over the events actually present, ignoring the feed's own
    /// `count` metadata.
    pub fn compute(
        collection: &EventCollection,
        extractor: &dyn RegionExtractor,
    ) -> Result<Self, StatsError> {
        let regions: Vec<&str> = collection
            .features
            .iter()
            .map(|e| extractor.region(e.place()))
            .collect();
        Self::from_regions(&collection.features, &regions)
    }

    /// Compute statistics from events and their already derived regions.
    fn from_regions(events: &[Event], regions: &[&str]) -> Result<Self, StatsError> {
        let mean_magnitude = mean_magnitude(events)?;
        let region_counts = count_regions(regions.iter().copied());
        let top_region = top_region(&region_counts);
        let regions = distinct_regions(regions.iter().copied());

        Ok(Self {
            mean_magnitude,
            region_counts,
            top_region,
            regions,
            selected_region: None,
        })
    }

    pub fn top_region_name(&self) -> &str {
        self.top_region.as_ref().map(|(name, _)| name.as_str()).unwrap_or("")
    }

    pub fn top_region_count(&self) -> usize {
        self.top_region.as_ref().map(|(_, count)| *count).unwrap_or(0)
    }
}

/// Mean magnitude over all events. Events without a magnitude count as 0.0.
pub fn mean_magnitude(events: &[Event]) -> Result<f64, StatsError> {
    if events.is_empty() {
        return Err(StatsError::EmptyDataset);
    }
    let sum: f64 = events.iter().map(|e| e.magnitude().unwrap_or(0.0)).sum();
    Ok(sum / events.len() as f64)
}

/// Count events per region.
pub fn count_regions<'a>(regions: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for region in regions {
        *counts.entry(region.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Region with the highest count. Ties go to the lexically smallest name.
pub fn top_region(counts: &BTreeMap<String, usize>) -> Option<(String, usize)> {
    let mut best: Option<(&String, usize)> = None;
    for (region, &count) in counts {
        // Strictly greater keeps the earlier (smaller) name on ties.
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((region, count));
        }
    }
    best.map(|(region, count)| (region.clone(), count))
}

/// Distinct regions in the order they were first seen.
pub fn distinct_regions<'a>(regions: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    regions
        .into_iter()
        .filter(|r| seen.insert(*r))
        .map(str::to_string)
        .collect()
}
