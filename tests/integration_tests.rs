use quake_map::analyzers::summary::summarize;
use quake_map::analyzers::{DaySelection, filter_by_day, group_by_day, selection_options};
use quake_map::parser::parse_feed;
use quake_map::render::{GeoJsonSink, render};
use quake_map::style::depth_scale;

const SAMPLE: &[u8] = include_bytes!("fixtures/sample_usgs.geojson");

#[test]
fn test_full_pipeline() {
    let feed = parse_feed(SAMPLE).expect("Failed to parse feed");
    // The feature with a null place is dropped.
    assert_eq!(feed.len(), 4);

    let buckets = group_by_day(&feed.events);
    let keys: Vec<String> = buckets.keys().map(|k| k.to_string()).collect();
    assert_eq!(keys, vec!["2024-03-10", "2024-03-09"]);

    let options = selection_options(&buckets);
    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "All Dates",
            "Sun Mar 10 2024 (3 earthquakes)",
            "Sat Mar 09 2024 (1 earthquakes)",
        ]
    );

    let selection: DaySelection = "2024-03-10".parse().unwrap();
    let visible = filter_by_day(&feed.events, &selection);
    let places: Vec<&str> = visible.iter().map(|e| e.place.as_str()).collect();
    assert_eq!(
        places,
        vec![
            "98 km SE of Hachinohe, Japan",
            "Fiji region",
            "South Sandwich Islands region",
        ]
    );

    let mut sink = GeoJsonSink::new();
    let report = render(visible, &depth_scale(), &mut sink);
    assert_eq!(report.rendered, 3);
    assert_eq!(report.skipped, 0);

    let doc = sink.to_geojson();
    assert_eq!(doc["features"].as_array().unwrap().len(), 3);
    assert_eq!(doc["features"][1]["id"], "us7000m1a2");
}

#[test]
fn test_buckets_cover_every_event_once() {
    let feed = parse_feed(SAMPLE).unwrap();
    let buckets = group_by_day(&feed.events);

    let total: usize = buckets.iter().map(|(_, events)| events.len()).sum();
    assert_eq!(total, feed.len());

    for event in &feed.events {
        let holders = buckets
            .iter()
            .filter(|(_, events)| events.iter().any(|e| std::ptr::eq(*e, event)))
            .count();
        assert_eq!(holders, 1);
    }
}

#[test]
fn test_summaries_from_fixture() {
    let feed = parse_feed(SAMPLE).unwrap();
    let summaries = summarize(&group_by_day(&feed.events));

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].count, 3);
    assert_eq!(summaries[0].max_magnitude, 6.1);
    assert_eq!(summaries[1].count, 1);
    assert_eq!(summaries[1].mean_depth_km, 110.5);
}
