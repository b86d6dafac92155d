//! GeoJSON parser for the USGS earthquake summary feed.

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::model::{Event, FeatureCollection, RawCollection, RawFeature, RawId};

/// Decodes a GeoJSON `FeatureCollection` into [`Event`]s, preserving feed order.
///
/// Features that are malformed, or missing a place, magnitude, time or a
/// position, are skipped with a warning. A missing depth (two-element
/// coordinates) is read as 0 km.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON or the document is not a
/// `FeatureCollection`.
pub fn parse_feed(bytes: &[u8]) -> Result<FeatureCollection> {
    let raw: RawCollection = serde_json::from_slice(bytes)?;
    if raw.kind != "FeatureCollection" {
        bail!("expected a FeatureCollection, got {:?}", raw.kind);
    }

    let total = raw.features.len();
    let events: Vec<Event> = raw
        .features
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let feature: RawFeature = match serde_json::from_value(value) {
                Ok(feature) => feature,
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed feature");
                    return None;
                }
            };
            let event = to_event(feature);
            if event.is_none() {
                warn!(index, "Skipping incomplete feature");
            }
            event
        })
        .collect();

    debug!(total, kept = events.len(), "Feed parsed");

    let (title, generated) = match raw.metadata {
        Some(m) => (m.title, m.generated.and_then(DateTime::<Utc>::from_timestamp_millis)),
        None => (None, None),
    };

    Ok(FeatureCollection {
        title,
        generated,
        events,
    })
}

fn to_event(feature: RawFeature) -> Option<Event> {
    let props = feature.properties?;
    let coords = feature.geometry?.coordinates;
    if coords.len() < 2 {
        return None;
    }

    Some(Event {
        id: feature.id.map(RawId::into_string),
        place: props.place?,
        magnitude: props.mag?,
        depth_km: coords.get(2).copied().unwrap_or(0.0),
        time: DateTime::<Utc>::from_timestamp_millis(props.time?)?,
        longitude: coords[0],
        latitude: coords[1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_collection() {
        let feed = parse_feed(br#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        assert!(feed.is_empty());
        assert_eq!(feed.title, None);
    }

    #[test]
    fn test_parse_invalid_bytes() {
        let result = parse_feed(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_non_collection() {
        let result = parse_feed(br#"{"type":"Feature","features":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_single_feature() {
        let json = br#"{
            "type": "FeatureCollection",
            "metadata": {"generated": 1700000000000, "title": "USGS Magnitude 4.5+ Earthquakes, Past Month"},
            "features": [{
                "type": "Feature",
                "id": "us7000abcd",
                "properties": {"mag": 5.1, "place": "10 km S of Somewhere", "time": 1699990000000},
                "geometry": {"type": "Point", "coordinates": [142.5, 38.2, 35.0]}
            }]
        }"#;

        let feed = parse_feed(json).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(
            feed.title.as_deref(),
            Some("USGS Magnitude 4.5+ Earthquakes, Past Month")
        );
        assert_eq!(feed.generated.unwrap().timestamp_millis(), 1700000000000);

        let e = &feed.events[0];
        assert_eq!(e.id.as_deref(), Some("us7000abcd"));
        assert_eq!(e.place, "10 km S of Somewhere");
        assert_eq!(e.magnitude, 5.1);
        assert_eq!(e.timestamp_ms(), 1699990000000);
        assert_eq!((e.longitude, e.latitude, e.depth_km), (142.5, 38.2, 35.0));
    }

    #[test]
    fn test_parse_skips_incomplete_features() {
        let json = br#"{
            "type": "FeatureCollection",
            "features": [
                {"properties": {"mag": null, "place": "a", "time": 1}, "geometry": {"coordinates": [0, 0, 1]}},
                {"properties": {"mag": 4.6, "place": "b", "time": 2}, "geometry": null},
                {"properties": {"mag": 4.7, "place": "c", "time": 3}, "geometry": {"coordinates": [1]}},
                {"properties": {"mag": 4.8, "place": "d", "time": 4}, "geometry": {"coordinates": [1, 2]}}
            ]
        }"#;

        let feed = parse_feed(json).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.events[0].place, "d");
        assert_eq!(feed.events[0].depth_km, 0.0);
    }

    #[test]
    fn test_parse_skips_null_properties() {
        let json = br#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": "x", "properties": null, "geometry": {"coordinates": [0, 0, 1]}},
                {"type": "Feature", "id": "y", "properties": {"mag": 4.8, "place": "kept", "time": 4}, "geometry": {"coordinates": [1, 2, 3]}}
            ]
        }"#;

        let feed = parse_feed(json).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.events[0].place, "kept");
    }

    #[test]
    fn test_parse_accepts_numeric_id() {
        let json = br#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": 42, "properties": {"mag": 4.8, "place": "n", "time": 4}, "geometry": {"coordinates": [1, 2, 3]}}
            ]
        }"#;

        let feed = parse_feed(json).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.events[0].id.as_deref(), Some("42"));
    }

    #[test]
    fn test_parse_skips_malformed_feature() {
        let json = br#"{
            "type": "FeatureCollection",
            "features": [
                "not a feature",
                {"properties": {"mag": "big", "place": "bad", "time": 1}, "geometry": {"coordinates": [0, 0]}},
                {"properties": {"mag": 5.0, "place": "good", "time": 2}, "geometry": {"coordinates": [0, 0]}}
            ]
        }"#;

        let feed = parse_feed(json).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.events[0].place, "good");
    }
}
