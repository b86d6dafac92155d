//! Marker styling: radius from magnitude, fill from depth, and the depth legend.

pub mod color;

pub use color::{Rgb, SequentialScale, interpolate_rainbow};

use serde::Serialize;
use thiserror::Error;

/// Depth range, in km, covered by the color scale.
pub const DEPTH_DOMAIN: (f64, f64) = (0.0, 700.0);

/// Depths listed in the legend.
pub const LEGEND_DEPTHS: [u32; 7] = [0, 100, 200, 300, 400, 500, 600];

pub const LEGEND_TITLE: &str = "Depth (km)";

/// Fixed stroke and opacity settings shared by every marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

pub const MARKER_STYLE: MarkerStyle = MarkerStyle {
    color: "#000",
    weight: 1.0,
    opacity: 1.0,
    fill_opacity: 0.8,
};

#[derive(Debug, Error, PartialEq)]
pub enum StyleError {
    #[error("magnitude must be non-negative, got {0}")]
    NegativeMagnitude(f64),
}

/// Marker radius: `sqrt(magnitude) * 5`.
///
/// # Errors
///
/// [`StyleError::NegativeMagnitude`] for negative or NaN input.
pub fn marker_size(magnitude: f64) -> Result<f64, StyleError> {
    if magnitude.is_nan() || magnitude < 0.0 {
        return Err(StyleError::NegativeMagnitude(magnitude));
    }
    Ok(magnitude.sqrt() * 5.0)
}

/// Fill color for `depth_km` on a rainbow scale over `domain`, clamped at both ends.
pub fn marker_color(depth_km: f64, domain: (f64, f64)) -> Rgb {
    SequentialScale::rainbow(domain).apply(depth_km)
}

/// The default depth scale used for markers and the legend.
pub fn depth_scale() -> SequentialScale {
    SequentialScale::rainbow(DEPTH_DOMAIN)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub depth_km: u32,
    pub color: Rgb,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: &'static str,
    pub entries: Vec<LegendEntry>,
}

/// Builds the depth legend from `scale`.
pub fn legend(scale: &SequentialScale) -> Legend {
    let entries = LEGEND_DEPTHS
        .iter()
        .map(|&depth| LegendEntry {
            depth_km: depth,
            color: scale.apply(depth as f64),
            label: format!("{depth}+"),
        })
        .collect();

    Legend {
        title: LEGEND_TITLE,
        entries,
    }
}
