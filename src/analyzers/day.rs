//! Calendar-day keys and the day selection sent back by the UI.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// A UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_time(time: DateTime<Utc>) -> Self {
        Self(time.date_naive())
    }

    /// Human label in the style of `Mon Oct 13 2025`.
    pub fn label(&self) -> String {
        self.0.format("%a %b %d %Y").to_string()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), KEY_FORMAT)
            .map(DayKey)
            .map_err(|_| SelectionParseError(s.to_string()))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Either every event or one day's events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DaySelection {
    #[default]
    All,
    Day(DayKey),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid day selection {0:?}, expected \"all\" or YYYY-MM-DD")]
pub struct SelectionParseError(pub String);

impl fmt::Display for DaySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySelection::All => f.write_str("all"),
            DaySelection::Day(key) => key.fmt(f),
        }
    }
}

impl FromStr for DaySelection {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(DaySelection::All)
        } else {
            s.parse().map(DaySelection::Day)
        }
    }
}
