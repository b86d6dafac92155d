//! Domain and wire types for the USGS earthquake GeoJSON feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One earthquake as received from the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: Option<String>,
    pub place: String,
    pub magnitude: f64,
    pub depth_km: f64,
    pub time: DateTime<Utc>,
    pub longitude: f64,
    pub latitude: f64,
}

impl Event {
    /// Epoch milliseconds, as carried by `properties.time`.
    pub fn timestamp_ms(&self) -> i64 {
        self.time.timestamp_millis()
    }
}

/// Ordered events of one fetch, plus whatever feed metadata was present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureCollection {
    pub title: Option<String>,
    pub generated: Option<DateTime<Utc>>,
    pub events: Vec<Event>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// Wire format. Everything a producer may leave out is optional here and
// validated during conversion in `parser`.

#[derive(Debug, Deserialize)]
pub(crate) struct RawCollection {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    #[serde(default)]
    pub(crate) metadata: Option<RawMetadata>,
    // Kept as raw values so one malformed feature cannot fail the document.
    #[serde(default)]
    pub(crate) features: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMetadata {
    pub(crate) title: Option<String>,
    pub(crate) generated: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFeature {
    pub(crate) id: Option<RawId>,
    pub(crate) properties: Option<RawProperties>,
    pub(crate) geometry: Option<RawGeometry>,
}

/// GeoJSON allows either a string or a number as a feature id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    pub(crate) fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawProperties {
    pub(crate) place: Option<String>,
    pub(crate) mag: Option<f64>,
    pub(crate) time: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawGeometry {
    #[serde(default)]
    pub(crate) coordinates: Vec<f64>,
}
