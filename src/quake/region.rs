//! Region labels derived from free-text place descriptions.

/// Strategy for turning a place description into a region label.
pub trait RegionExtractor: Send + Sync {
    fn region<'a>(&self, place: &'a str) -> &'a str;
}

/// Takes the text after the last comma, e.g. `"10km SW of Anza, CA"` -> `"CA"`.
///
/// Places without a comma are returned unchanged. This is a plain text
/// heuristic with no knowledge of real borders.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingSegment;

impl RegionExtractor for TrailingSegment {
    fn region<'a>(&self, place: &'a str) -> &'a str {
        match place.rsplit_once(',') {
            Some((_, tail)) => tail.trim_start(),
            None => place,
        }
    }
}
