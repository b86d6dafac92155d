//! Output formatting and persistence for markers and day summaries.
//!
//! Supports JSON logging, atomic GeoJSON file writes, and CSV append.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::summary::DaySummary;
use csv::WriterBuilder;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes `value` as JSON to `path`, creating parent directories.
///
/// The document goes to a sibling temp file first and is then renamed over
/// `path`, so readers never see a half-written file.
pub fn write_json_file(path: &str, value: &impl Serialize) -> Result<()> {
    let target = Path::new(path);
    if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let tmp = target.with_extension("tmp");
    let body = serde_json::to_vec_pretty(value)?;
    fs::write(&tmp, body).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, target).with_context(|| format!("replacing {path}"))?;

    debug!(path, "JSON written");
    Ok(())
}

/// Appends [`DaySummary`] rows to a CSV file.
///
/// Writes headers first if the file is missing or empty.
pub fn append_summaries(path: &str, summaries: &[DaySummary]) -> Result<()> {
    let file_exists = fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
    debug!(path, file_exists, rows = summaries.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;

    Ok(())
}
