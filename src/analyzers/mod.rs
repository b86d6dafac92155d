//! Day-based aggregation and filtering of earthquake events.
//!
//! Events are bucketed by the UTC calendar day of their timestamp. The same
//! day key drives the picker options, the per-day summaries and the filter
//! applied before rendering.

pub mod aggregate;
pub mod day;
pub mod summary;
pub mod utility;

pub use aggregate::{DayBuckets, SelectOption, filter_by_day, group_by_day, selection_options};
pub use day::{DayKey, DaySelection, SelectionParseError};
