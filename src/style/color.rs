//! Rainbow color interpolation and a clamped sequential scale.

use serde::{Serialize, Serializer};
use std::f64::consts::PI;
use std::fmt;

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

// Cubehelix basis (Green, 2011).
const A: f64 = -0.14861;
const B: f64 = 1.78277;
const C: f64 = -0.29227;
const D: f64 = -0.90649;
const E: f64 = 1.97294;

fn channel(v: f64) -> u8 {
    let v = (v * 255.0).round();
    if v.is_nan() { 0 } else { v.clamp(0.0, 255.0) as u8 }
}

/// Cubehelix color with hue in degrees, saturation and lightness in [0, 1].
fn cubehelix(h: f64, s: f64, l: f64) -> Rgb {
    let h = (h + 120.0) * PI / 180.0;
    let a = s * l * (1.0 - l);
    let (sin_h, cos_h) = h.sin_cos();

    Rgb {
        r: channel(l + a * (A * cos_h + B * sin_h)),
        g: channel(l + a * (C * cos_h + D * sin_h)),
        b: channel(l + a * (E * cos_h)),
    }
}

/// Cyclical cubehelix rainbow. `t` outside [0, 1] wraps around, so `t = 0`
/// and `t = 1` land on the same purple.
pub fn interpolate_rainbow(t: f64) -> Rgb {
    let t = if (0.0..=1.0).contains(&t) { t } else { t - t.floor() };
    let ts = (t - 0.5).abs();
    cubehelix(360.0 * t - 100.0, 1.5 - 1.5 * ts, 0.8 - 0.9 * ts)
}

/// Maps a numeric domain onto an interpolator, clamping out-of-domain input
/// to the nearest end.
#[derive(Clone, Copy)]
pub struct SequentialScale {
    domain: (f64, f64),
    interpolator: fn(f64) -> Rgb,
}

impl SequentialScale {
    pub fn new(domain: (f64, f64), interpolator: fn(f64) -> Rgb) -> Self {
        Self {
            domain,
            interpolator,
        }
    }

    pub fn rainbow(domain: (f64, f64)) -> Self {
        Self::new(domain, interpolate_rainbow)
    }

    /// Position of `value` within the domain, clamped to [0, 1].
    /// A degenerate domain puts everything at the midpoint; NaN maps to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let (lo, hi) = self.domain;
        let t = if lo == hi {
            0.5
        } else {
            (value - lo) / (hi - lo)
        };
        if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
    }

    pub fn apply(&self, value: f64) -> Rgb {
        (self.interpolator)(self.normalize(value))
    }
}

impl fmt::Debug for SequentialScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequentialScale")
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}
