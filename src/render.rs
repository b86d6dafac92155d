//! Turns events into styled markers and hands them to a [`MarkerSink`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::model::Event;
use crate::style::{MARKER_STYLE, Rgb, SequentialScale, StyleError, marker_size};

/// Everything a map layer needs to draw one earthquake.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: Option<String>,
    pub place: String,
    pub magnitude: f64,
    pub depth_km: f64,
    pub time: DateTime<Utc>,
    pub longitude: f64,
    pub latitude: f64,
    pub radius: f64,
    pub fill: Rgb,
    pub popup: String,
}

impl Marker {
    pub fn from_event(event: &Event, scale: &SequentialScale) -> Result<Self, StyleError> {
        Ok(Self {
            id: event.id.clone(),
            place: event.place.clone(),
            magnitude: event.magnitude,
            depth_km: event.depth_km,
            time: event.time,
            longitude: event.longitude,
            latitude: event.latitude,
            radius: marker_size(event.magnitude)?,
            fill: scale.apply(event.depth_km),
            popup: popup_text(event),
        })
    }

    /// GeoJSON point feature carrying the marker style in its properties.
    pub fn to_feature(&self) -> Value {
        json!({
            "type": "Feature",
            "id": self.id,
            "geometry": {
                "type": "Point",
                "coordinates": [self.longitude, self.latitude, self.depth_km],
            },
            "properties": {
                "place": self.place,
                "mag": self.magnitude,
                "time": self.time.timestamp_millis(),
                "radius": self.radius,
                "fillColor": self.fill,
                "color": MARKER_STYLE.color,
                "weight": MARKER_STYLE.weight,
                "opacity": MARKER_STYLE.opacity,
                "fillOpacity": MARKER_STYLE.fill_opacity,
                "popup": self.popup,
            },
        })
    }
}

/// Popup/tooltip body for an event.
pub fn popup_text(event: &Event) -> String {
    format!(
        "Place: {}<br>Magnitude: {}<br>Time: {}",
        event.place,
        event.magnitude,
        event.time.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Receiver of rendered markers, typically a map layer group.
pub trait MarkerSink {
    /// Drops every marker currently shown.
    fn clear(&mut self);
    fn add(&mut self, marker: Marker);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    pub rendered: usize,
    pub skipped: usize,
}

/// Clears `sink` and adds one marker per event. Events that cannot be styled
/// are skipped and counted.
pub fn render<'a, I, S>(events: I, scale: &SequentialScale, sink: &mut S) -> RenderReport
where
    I: IntoIterator<Item = &'a Event>,
    S: MarkerSink + ?Sized,
{
    sink.clear();
    let mut report = RenderReport::default();

    for event in events {
        match Marker::from_event(event, scale) {
            Ok(marker) => {
                sink.add(marker);
                report.rendered += 1;
            }
            Err(e) => {
                warn!(place = %event.place, error = %e, "Skipping marker");
                report.skipped += 1;
            }
        }
    }

    debug!(rendered = report.rendered, skipped = report.skipped, "Markers rendered");
    report
}

/// Collects markers into a styled GeoJSON `FeatureCollection`.
#[derive(Debug, Default)]
pub struct GeoJsonSink {
    markers: Vec<Marker>,
}

impl GeoJsonSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn to_geojson(&self) -> Value {
        json!({
            "type": "FeatureCollection",
            "features": self.markers.iter().map(Marker::to_feature).collect::<Vec<_>>(),
        })
    }
}

impl MarkerSink for GeoJsonSink {
    fn clear(&mut self) {
        self.markers.clear();
    }

    fn add(&mut self, marker: Marker) {
        self.markers.push(marker);
    }
}
