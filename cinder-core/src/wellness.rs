//! Weighted burnout index and daily burnout risk over desktop activity metrics.
//!
//! The index is 0-100 where higher means healthier; [`BurnoutLevel`] maps it
//! to Low/Medium/High burnout. The risk model runs the other way: it rises
//! with idle time, distraction and switching.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregated behaviour over a window of activity samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetrics {
    /// Share of samples where the user was idle.
    pub idle_ratio: f64,
    /// Share of samples on a distraction app.
    pub distraction_ratio: f64,
    /// Share of samples where the foreground window changed.
    pub switch_rate: f64,
    /// Mean productivity score scaled to 0..1.
    pub avg_score: f64,
}

/// Per-metric weights; they sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexWeights {
    pub idle: f64,
    pub distraction: f64,
    pub switching: f64,
    pub score: f64,
}

impl Default for IndexWeights {
    fn default() -> Self {
        Self {
            idle: 0.25,
            distraction: 0.25,
            switching: 0.20,
            score: 0.30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BurnoutLevel {
    Low,
    Medium,
    High,
}

impl BurnoutLevel {
    pub fn from_index(index: f64) -> Self {
        if index >= 75.0 {
            BurnoutLevel::Low
        } else if index >= 50.0 {
            BurnoutLevel::Medium
        } else {
            BurnoutLevel::High
        }
    }
}

impl fmt::Display for BurnoutLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BurnoutLevel::Low => "Low",
            BurnoutLevel::Medium => "Medium",
            BurnoutLevel::High => "High",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurnoutIndex {
    /// 0-100, one decimal.
    pub value: f64,
    pub level: BurnoutLevel,
}

/// Closeness of `value` to `ideal` within `tolerance`, in 0..1.
/// `reverse` flips the scale.
pub fn normalize(value: f64, ideal: f64, tolerance: f64, reverse: bool) -> f64 {
    let score = (1.0 - (value - ideal).abs() / tolerance).max(0.0);
    if reverse { 1.0 - score } else { score }
}

pub fn burnout_index(metrics: &ActivityMetrics, weights: &IndexWeights) -> BurnoutIndex {
    let idle = normalize(metrics.idle_ratio, 0.15, 0.20, true);
    let distraction = normalize(metrics.distraction_ratio, 0.10, 0.15, true);
    let switching = normalize(metrics.switch_rate, 0.10, 0.10, true);
    let score = normalize(metrics.avg_score, 0.80, 0.25, false);

    let raw = 100.0
        * (idle * weights.idle
            + distraction * weights.distraction
            + switching * weights.switching
            + score * weights.score);
    let value = (raw * 10.0).round() / 10.0;

    BurnoutIndex {
        value,
        level: BurnoutLevel::from_index(value),
    }
}

/// Linear risk model weights. `score` applies to `1 - avg_score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub idle: f64,
    pub distraction: f64,
    pub switching: f64,
    pub score: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            idle: 0.3,
            distraction: 0.3,
            switching: 0.2,
            score: -0.4,
        }
    }
}

/// Burnout risk in 0..1; higher is worse.
pub fn burnout_risk(metrics: &ActivityMetrics, weights: &RiskWeights) -> f64 {
    let raw = weights.idle * metrics.idle_ratio
        + weights.distraction * metrics.distraction_ratio
        + weights.switching * metrics.switch_rate
        + weights.score * (1.0 - metrics.avg_score);
    raw.clamp(0.0, 1.0)
}

/// Alert limits for a single activity window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub idle: f64,
    pub distraction: f64,
    pub switching: f64,
    /// Alert when the 0..1 score falls below this.
    pub min_score: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            idle: 0.40,
            distraction: 0.35,
            switching: 0.20,
            min_score: 0.50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityAlert {
    HighIdle,
    HighDistraction,
    FrequentSwitching,
    LowProductivity,
}

impl ActivityAlert {
    pub fn message(&self) -> &'static str {
        match self {
            ActivityAlert::HighIdle => "High idle time detected.",
            ActivityAlert::HighDistraction => "Too much time on distracting apps.",
            ActivityAlert::FrequentSwitching => "Frequent app switching noted.",
            ActivityAlert::LowProductivity => "Productivity score is low.",
        }
    }
}

pub fn check_alerts(metrics: &ActivityMetrics, limits: &AlertThresholds) -> Vec<ActivityAlert> {
    let mut alerts = Vec::new();
    if metrics.idle_ratio > limits.idle {
        alerts.push(ActivityAlert::HighIdle);
    }
    if metrics.distraction_ratio > limits.distraction {
        alerts.push(ActivityAlert::HighDistraction);
    }
    if metrics.switch_rate > limits.switching {
        alerts.push(ActivityAlert::FrequentSwitching);
    }
    if metrics.avg_score < limits.min_score {
        alerts.push(ActivityAlert::LowProductivity);
    }
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(0.15, 0.15, 0.20, false), 1.0);
        assert_eq!(normalize(0.15, 0.15, 0.20, true), 0.0);
        assert_eq!(normalize(0.90, 0.15, 0.20, false), 0.0);
        assert!((normalize(0.25, 0.15, 0.20, false) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_index_levels() {
        assert_eq!(BurnoutLevel::from_index(75.0), BurnoutLevel::Low);
        assert_eq!(BurnoutLevel::from_index(74.9), BurnoutLevel::Medium);
        assert_eq!(BurnoutLevel::from_index(50.0), BurnoutLevel::Medium);
        assert_eq!(BurnoutLevel::from_index(12.0), BurnoutLevel::High);
    }

    #[test]
    fn test_index_far_from_ideals() {
        // Every reversed metric far from its ideal contributes fully; score at ideal too.
        let m = ActivityMetrics {
            idle_ratio: 0.9,
            distraction_ratio: 0.9,
            switch_rate: 0.9,
            avg_score: 0.8,
        };
        let idx = burnout_index(&m, &IndexWeights::default());
        assert_eq!(idx.value, 100.0);
        assert_eq!(idx.level, BurnoutLevel::Low);
        // the risk model reads the same window as close to burnout
        assert!(burnout_risk(&m, &RiskWeights::default()) > 0.6);
    }

    #[test]
    fn test_risk_rises_with_idle_and_distraction() {
        let w = RiskWeights::default();
        let base = ActivityMetrics {
            idle_ratio: 0.1,
            distraction_ratio: 0.1,
            switch_rate: 0.25,
            avg_score: 0.8,
        };
        let idle = ActivityMetrics {
            idle_ratio: 0.6,
            ..base
        };
        let distracted = ActivityMetrics {
            distraction_ratio: 0.6,
            ..base
        };
        let r = burnout_risk(&base, &w);
        // 0.03 + 0.03 + 0.05 - 0.08
        assert!((r - 0.03).abs() < 1e-12);
        assert!(burnout_risk(&idle, &w) > r);
        assert!(burnout_risk(&distracted, &w) > r);
    }

    #[test]
    fn test_risk_is_clamped() {
        let w = RiskWeights::default();
        let calm = ActivityMetrics {
            avg_score: 0.2,
            ..Default::default()
        };
        assert_eq!(burnout_risk(&calm, &w), 0.0);
        let heavy = RiskWeights {
            idle: 5.0,
            ..w
        };
        let idle = ActivityMetrics {
            idle_ratio: 1.0,
            avg_score: 1.0,
            ..Default::default()
        };
        assert_eq!(burnout_risk(&idle, &heavy), 1.0);
    }

    #[test]
    fn test_index_rounds_to_one_decimal() {
        let m = ActivityMetrics {
            idle_ratio: 0.15,
            distraction_ratio: 0.10,
            switch_rate: 0.10,
            avg_score: 0.70,
        };
        // only score contributes: normalize(0.7, 0.8, 0.25) = 0.6 -> 100 * 0.18
        let idx = burnout_index(&m, &IndexWeights::default());
        assert_eq!(idx.value, 18.0);
        assert_eq!(idx.level, BurnoutLevel::High);
    }

    #[test]
    fn test_alerts() {
        let m = ActivityMetrics {
            idle_ratio: 0.5,
            distraction_ratio: 0.1,
            switch_rate: 0.3,
            avg_score: 0.4,
        };
        assert_eq!(
            check_alerts(&m, &AlertThresholds::default()),
            vec![
                ActivityAlert::HighIdle,
                ActivityAlert::FrequentSwitching,
                ActivityAlert::LowProductivity
            ]
        );
        let calm = ActivityMetrics {
            avg_score: 0.9,
            ..Default::default()
        };
        assert!(check_alerts(&calm, &AlertThresholds::default()).is_empty());
    }
}
