use indexmap::IndexMap;
use serde::Serialize;

use crate::analyzers::day::{DayKey, DaySelection};
use crate::model::Event;

/// Events bucketed by UTC day. Keys keep first-seen order, and so do the
/// events inside each bucket.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DayBuckets<'a> {
    buckets: IndexMap<DayKey, Vec<&'a Event>>,
}

impl<'a> DayBuckets<'a> {
    pub fn get(&self, key: &DayKey) -> Option<&[&'a Event]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &DayKey> {
        self.buckets.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DayKey, &[&'a Event])> {
        self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// One entry of the day picker: the value sent back and the text shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Groups `events` by the UTC day of their timestamp.
pub fn group_by_day(events: &[Event]) -> DayBuckets<'_> {
    let mut buckets: IndexMap<DayKey, Vec<&Event>> = IndexMap::new();

    for event in events {
        buckets
            .entry(DayKey::from_time(event.time))
            .or_default()
            .push(event);
    }

    DayBuckets { buckets }
}

/// Returns the events matching `selection`, in input order.
pub fn filter_by_day<'a>(events: &'a [Event], selection: &DaySelection) -> Vec<&'a Event> {
    match selection {
        DaySelection::All => events.iter().collect(),
        DaySelection::Day(key) => events
            .iter()
            .filter(|e| DayKey::from_time(e.time) == *key)
            .collect(),
    }
}

/// Picker entries: "All Dates" followed by one option per day in bucket order.
pub fn selection_options(buckets: &DayBuckets<'_>) -> Vec<SelectOption> {
    let mut options = vec![SelectOption {
        value: DaySelection::All.to_string(),
        label: "All Dates".to_string(),
    }];

    options.extend(buckets.iter().map(|(key, events)| SelectOption {
        value: key.to_string(),
        label: format!("{} ({} earthquakes)", key.label(), events.len()),
    }));

    options
}
