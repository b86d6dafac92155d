use serde::Serialize;

use crate::analyzers::aggregate::DayBuckets;
use crate::analyzers::day::DayKey;
use crate::analyzers::utility::{max, mean};

/// Per-day figures shown next to the picker and appended to CSV by `days --csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: DayKey,
    pub count: usize,
    pub max_magnitude: f64,
    pub mean_magnitude: f64,
    pub mean_depth_km: f64,
}

/// Summarizes each bucket, in bucket order.
pub fn summarize(buckets: &DayBuckets<'_>) -> Vec<DaySummary> {
    buckets
        .iter()
        .map(|(day, events)| {
            let mags: Vec<f64> = events.iter().map(|e| e.magnitude).collect();
            let depths: Vec<f64> = events.iter().map(|e| e.depth_km).collect();

            DaySummary {
                day: *day,
                count: events.len(),
                max_magnitude: max(&mags),
                mean_magnitude: mean(&mags),
                mean_depth_km: mean(&depths),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate::group_by_day;
    use crate::model::Event;
    use chrono::{DateTime, Utc};

    fn event(mag: f64, depth: f64, ts_ms: i64) -> Event {
        Event {
            id: None,
            place: "somewhere".to_string(),
            magnitude: mag,
            depth_km: depth,
            time: DateTime::<Utc>::from_timestamp_millis(ts_ms).unwrap(),
            longitude: 0.0,
            latitude: 0.0,
        }
    }

    #[test]
    fn test_summarize_per_day() {
        // 2024-03-10 and 2024-03-11 UTC
        let events = vec![
            event(4.5, 10.0, 1_710_028_800_000),
            event(6.5, 30.0, 1_710_030_000_000),
            event(5.0, 100.0, 1_710_115_200_000),
        ];
        let buckets = group_by_day(&events);
        let summaries = summarize(&buckets);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].day.to_string(), "2024-03-10");
        assert_eq!(summaries[0].count, 2);
        assert_eq!(summaries[0].max_magnitude, 6.5);
        assert_eq!(summaries[0].mean_magnitude, 5.5);
        assert_eq!(summaries[0].mean_depth_km, 20.0);
        assert_eq!(summaries[1].count, 1);
        assert_eq!(summaries[1].mean_depth_km, 100.0);
    }

    #[test]
    fn test_summarize_empty() {
        let buckets = group_by_day(&[]);
        assert!(summarize(&buckets).is_empty());
    }
}
