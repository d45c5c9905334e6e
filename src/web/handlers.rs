//! HTTP request handlers.

use super::AppState;
use crate::quake::{AggregateStats, Event};

use askama::Template;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Utc};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

// ============================================================================
// View models
// ============================================================================

/// One table row of the event list.
pub struct EventRow<'a> {
    pub time: String,
    pub place: &'a str,
    pub region: &'a str,
    pub magnitude: String,
    pub depth: String,
    pub alert: String,
    pub url: &'a str,
}

impl<'a> EventRow<'a> {
    fn new(event: &'a Event, region: &'a str) -> Self {
        Self {
            time: format_time(event.occurred_at()),
            place: event.place(),
            region,
            magnitude: event
                .magnitude()
                .map(|m| format!("{:.1}", m))
                .unwrap_or_else(|| "-".to_string()),
            depth: event
                .geometry
                .depth()
                .map(|d| format!("{:.1} km", d))
                .unwrap_or_else(|| "-".to_string()),
            alert: event
                .properties
                .alert
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            url: &event.properties.url,
        }
    }
}

/// One row of the per-region count table.
pub struct RegionCount<'a> {
    pub name: &'a str,
    pub count: usize,
    pub selected: bool,
}

fn region_counts(stats: &AggregateStats) -> Vec<RegionCount<'_>> {
    let selected = stats.selected_region.as_deref();
    stats
        .region_counts
        .iter()
        .map(|(name, &count)| RegionCount {
            name: name.as_str(),
            count,
            selected: selected == Some(name.as_str()),
        })
        .collect()
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

// ============================================================================
// Templates
// ============================================================================

#[derive(Template)]
#[template(path = "overview.html")]
pub struct OverviewTemplate<'a> {
    pub title: &'a str,
    pub generated: String,
    pub source_url: &'a str,
    pub event_count: usize,
    pub stats: &'a AggregateStats,
    pub region_counts: Vec<RegionCount<'a>>,
    pub rows: Vec<EventRow<'a>>,
    pub points_json: String,
}

#[derive(Template)]
#[template(path = "region.html")]
pub struct RegionTemplate<'a> {
    pub title: &'a str,
    pub generated: String,
    pub source_url: &'a str,
    pub event_count: usize,
    pub selected_region: &'a str,
    pub stats: &'a AggregateStats,
    pub region_counts: Vec<RegionCount<'a>>,
    pub rows: Vec<EventRow<'a>>,
}

/// Render a template, answering 500 with the error text on failure.
fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render {}: {}", std::any::type_name::<T>(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn page_title(title: &str) -> &str {
    if title.is_empty() {
        "Earthquakes"
    } else {
        title
    }
}

// ============================================================================
// Pages
// ============================================================================

pub async fn handle_overview(State(state): State<AppState>) -> Response {
    let service = &state.service;
    let overview = service.get_all();
    let collection = overview.collection;

    let rows = collection
        .features
        .iter()
        .enumerate()
        .map(|(i, e)| EventRow::new(e, service.region_at(i).unwrap_or("")))
        .collect();

    let points_json =
        serde_json::to_string(&service.coordinates()).unwrap_or_else(|_| "[]".to_string());

    let page = OverviewTemplate {
        title: page_title(&collection.metadata.title),
        generated: format_time(collection.metadata.generated_at()),
        source_url: &collection.metadata.url,
        event_count: collection.features.len(),
        stats: overview.stats,
        region_counts: region_counts(overview.stats),
        rows,
        points_json,
    };

    render(&page)
}

pub async fn handle_region(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Response {
    let service = &state.service;
    let view = service.get_by_region(&region);
    tracing::debug!("Region {:?} matched {} events", region, view.events.len());

    let selected = view.selected_region();
    let rows = view
        .events
        .iter()
        .map(|e| EventRow::new(e, selected))
        .collect();

    let page = RegionTemplate {
        title: page_title(&view.metadata.title),
        generated: format_time(view.metadata.generated_at()),
        source_url: &view.metadata.url,
        event_count: service.get_all().collection.features.len(),
        selected_region: selected,
        stats: &view.stats,
        region_counts: region_counts(&view.stats),
        rows,
    };

    render(&page)
}

/// Permanently redirect to the same path with its trailing slash toggled.
pub async fn redirect_trailing_slash(uri: Uri) -> Response {
    let path = uri.path();
    let target = match path.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => format!("{}/", path),
    };
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, target)]).into_response()
}
