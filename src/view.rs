//! The live map state: last-good feed, current day selection and rendered markers.

use anyhow::Result;
use serde_json::Value;
use tracing::{error, info};

use crate::analyzers::{
    DayBuckets, DaySelection, SelectOption, filter_by_day, group_by_day, selection_options,
};
use crate::fetch::{HttpClient, fetch_bytes};
use crate::model::FeatureCollection;
use crate::parser::parse_feed;
use crate::render::{GeoJsonSink, Marker, RenderReport, render};
use crate::style::SequentialScale;

/// Owns what the original page kept in globals: the scale, the marker layer
/// and the data currently on screen.
#[derive(Debug)]
pub struct MapView {
    scale: SequentialScale,
    collection: FeatureCollection,
    selection: DaySelection,
    layer: GeoJsonSink,
}

impl MapView {
    pub fn new(scale: SequentialScale) -> Self {
        Self {
            scale,
            collection: FeatureCollection::default(),
            selection: DaySelection::All,
            layer: GeoJsonSink::new(),
        }
    }

    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    pub fn selection(&self) -> DaySelection {
        self.selection
    }

    pub fn markers(&self) -> &[Marker] {
        self.layer.markers()
    }

    /// The rendered markers as a styled GeoJSON `FeatureCollection`.
    pub fn to_geojson(&self) -> Value {
        self.layer.to_geojson()
    }

    pub fn scale(&self) -> &SequentialScale {
        &self.scale
    }

    pub fn buckets(&self) -> DayBuckets<'_> {
        group_by_day(&self.collection.events)
    }

    pub fn selection_options(&self) -> Vec<SelectOption> {
        selection_options(&self.buckets())
    }

    /// Replaces the collection with `collection` and re-renders the current selection.
    pub fn replace(&mut self, collection: FeatureCollection) -> RenderReport {
        self.collection = collection;
        self.redraw()
    }

    /// Parses `bytes` as a feed and shows it. On error nothing changes.
    pub fn load(&mut self, bytes: &[u8]) -> Result<RenderReport> {
        let collection = parse_feed(bytes)?;
        Ok(self.replace(collection))
    }

    /// Switches to `selection` and re-renders from the data already loaded.
    pub fn select(&mut self, selection: DaySelection) -> RenderReport {
        self.selection = selection;
        self.redraw()
    }

    /// Fetches `url` and shows the result.
    ///
    /// A failed download or parse is logged once and returned; the previous
    /// collection and markers stay in place.
    #[tracing::instrument(skip(self, client), fields(selection = %self.selection))]
    pub async fn refresh<C: HttpClient>(&mut self, client: &C, url: &str) -> Result<RenderReport> {
        let outcome = match fetch_bytes(client, url).await {
            Ok(bytes) => self.load(&bytes),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(report) => {
                info!(
                    title = self.collection.title.as_deref().unwrap_or("untitled"),
                    generated = ?self.collection.generated,
                    events = self.collection.len(),
                    rendered = report.rendered,
                    skipped = report.skipped,
                    "Feed refreshed"
                );
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, "Error fetching earthquake data");
                Err(e)
            }
        }
    }

    fn redraw(&mut self) -> RenderReport {
        let visible = filter_by_day(&self.collection.events, &self.selection);
        render(visible, &self.scale, &mut self.layer)
    }
}
