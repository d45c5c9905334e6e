//! Decoding of raw feed bytes.

use super::models::EventCollection;
use thiserror::Error;

/// Feed decoding errors.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("empty response body")]
    Empty,
    #[error("malformed event feed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a GeoJSON feature collection.
///
/// Unknown fields are ignored and missing or `null` ones take their zero
/// value, but a document that is not a JSON object of the expected shape is
/// an error.
pub fn decode_collection(bytes: &[u8]) -> Result<EventCollection, DecodeError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quake::Measure;

    const FEED: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {
            "generated": 1677715200000,
            "url": "https://earthquake.usgs.gov/fdsnws/event/1/query?format=geojson&starttime=2023-03-01&endtime=2023-03-02",
            "title": "USGS Earthquakes",
            "status": 200,
            "api": "1.14.0",
            "count": 2
        },
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "mag": 4.2,
                    "place": "12 km NNE of Ridgecrest, CA",
                    "time": 1677701000000,
                    "updated": 1677702000000,
                    "tz": null,
                    "felt": 12,
                    "cdi": 3.4,
                    "mmi": null,
                    "alert": "green",
                    "tsunami": 0,
                    "sig": 271,
                    "nst": null,
                    "magType": "ml",
                    "type": "earthquake",
                    "title": "M 4.2 - 12 km NNE of Ridgecrest, CA",
                    "somethingNew": {"nested": true}
                },
                "geometry": {"type": "Point", "coordinates": [-117.6, 35.7, 7.9]},
                "id": "ci40000001"
            },
            {
                "type": "Feature",
                "properties": {"mag": null, "place": null},
                "geometry": null,
                "id": "us7000abcd"
            }
        ],
        "bbox": [-117.6, 35.7, 7.9, -117.6, 35.7, 7.9]
    }"#;

    #[test]
    fn test_decode_feed() {
        let collection = decode_collection(FEED.as_bytes()).unwrap();
        assert_eq!(collection.kind, "FeatureCollection");
        assert_eq!(collection.metadata.status, 200);
        assert_eq!(collection.metadata.count, 2);
        assert_eq!(collection.features.len(), 2);
        assert_eq!(collection.bbox.len(), 6);

        let first = &collection.features[0];
        assert_eq!(first.magnitude(), Some(4.2));
        assert_eq!(first.place(), "12 km NNE of Ridgecrest, CA");
        assert_eq!(first.properties.tz, 0);
        assert_eq!(first.properties.felt, Some(Measure::Number(12.0)));
        assert_eq!(first.properties.alert, Some(Measure::Text("green".to_string())));
        assert!(first.properties.mmi.is_none());
        assert_eq!(first.properties.mag_type, "ml");
        assert_eq!(first.geometry.depth(), Some(7.9));
    }

    #[test]
    fn test_decode_tolerates_nulls() {
        let collection = decode_collection(FEED.as_bytes()).unwrap();
        let second = &collection.features[1];
        assert!(second.magnitude().is_none());
        assert_eq!(second.place(), "");
        assert!(second.geometry.coordinates.is_empty());
    }

    #[test]
    fn test_decode_missing_sections() {
        let collection = decode_collection(br#"{"type": "FeatureCollection"}"#).unwrap();
        assert!(collection.features.is_empty());
        assert_eq!(collection.metadata.count, 0);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode_collection(b""), Err(DecodeError::Empty)));
        assert!(matches!(decode_collection(b"  \n"), Err(DecodeError::Empty)));
        assert!(matches!(
            decode_collection(b"Error 400: Bad Request"),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            decode_collection(br#"{"features": "nope"}"#),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(decode_collection(b"[1, 2"), Err(DecodeError::Json(_))));
    }
}
