//! Per-metric daily trends over the last week and the alerts they raise.

use cinder_core::{TrendDirection, detect_trend};
use serde::{Deserialize, Serialize};

use crate::aggregate::DailySummary;

/// Trailing days fed to the trend detector.
pub const TREND_WINDOW_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricTrends {
    pub idle: TrendDirection,
    pub distraction: TrendDirection,
    pub switching: TrendDirection,
    /// Over the 0-100 daily mean score.
    pub score: TrendDirection,
}

pub fn metric_trends(days: &[DailySummary]) -> MetricTrends {
    let recent = &days[days.len().saturating_sub(TREND_WINDOW_DAYS)..];
    let series = |f: fn(&DailySummary) -> f64| -> Vec<f64> { recent.iter().map(f).collect() };

    MetricTrends {
        idle: detect_trend(&series(|d| d.metrics.idle_ratio)),
        distraction: detect_trend(&series(|d| d.metrics.distraction_ratio)),
        switching: detect_trend(&series(|d| d.metrics.switch_rate)),
        score: detect_trend(&series(|d| d.metrics.avg_score * 100.0)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendAlert {
    ProductivityFalling,
    IdleRising,
    DistractionRising,
    ProductivityImproving,
    IrregularFocus,
}

impl TrendAlert {
    pub fn message(&self) -> &'static str {
        match self {
            TrendAlert::ProductivityFalling => "Productivity is falling. Risk of burnout.",
            TrendAlert::IdleRising => "Idle time is increasing. Possible disengagement.",
            TrendAlert::DistractionRising => "More time on distracting apps.",
            TrendAlert::ProductivityImproving => "Productivity improving. Great work!",
            TrendAlert::IrregularFocus => "Focus patterns are irregular. Take care.",
        }
    }
}

pub fn trend_alerts(trends: &MetricTrends) -> Vec<TrendAlert> {
    let mut out = Vec::new();
    if trends.score == TrendDirection::Downward {
        out.push(TrendAlert::ProductivityFalling);
    }
    if trends.idle == TrendDirection::Upward {
        out.push(TrendAlert::IdleRising);
    }
    if trends.distraction == TrendDirection::Upward {
        out.push(TrendAlert::DistractionRising);
    }
    if trends.score == TrendDirection::Upward {
        out.push(TrendAlert::ProductivityImproving);
    }
    if trends.score == TrendDirection::Volatile {
        out.push(TrendAlert::IrregularFocus);
    }
    out
}
