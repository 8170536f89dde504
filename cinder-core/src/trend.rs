//! Trend direction from a least-squares slope over sample index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this absolute slope a series is flat.
pub const STABLE_SLOPE: f64 = 0.001;
/// Beyond this slope (either sign) a series has a direction.
pub const DIRECTIONAL_SLOPE: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    NotEnoughData,
    Stable,
    Upward,
    Downward,
    /// Slope sits between the stable and directional bands.
    Volatile,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::NotEnoughData => "Not enough data",
            TrendDirection::Stable => "Stable",
            TrendDirection::Upward => "Upward",
            TrendDirection::Downward => "Downward",
            TrendDirection::Volatile => "Volatile",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinary least-squares slope of `values` against 0, 1, 2, ...
///
/// `None` for fewer than two points.
pub fn slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = (nf - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / nf;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        num += dx * (y - mean_y);
        den += dx * dx;
    }
    Some(num / den)
}

/// Classify the direction of `values`. Needs at least three points.
pub fn detect_trend(values: &[f64]) -> TrendDirection {
    if values.len() < 3 {
        return TrendDirection::NotEnoughData;
    }
    let Some(s) = slope(values) else {
        return TrendDirection::NotEnoughData;
    };

    if s.abs() < STABLE_SLOPE {
        TrendDirection::Stable
    } else if s > DIRECTIONAL_SLOPE {
        TrendDirection::Upward
    } else if s < -DIRECTIONAL_SLOPE {
        TrendDirection::Downward
    } else {
        TrendDirection::Volatile
    }
}
