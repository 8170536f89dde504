//! Day-over-baseline behaviour shifts: one day against the week before it.

use chrono::{Days, NaiveDate};
use cinder_core::ActivityMetrics;
use serde::{Deserialize, Serialize};

use crate::activity_log::ActivitySample;
use crate::aggregate::compute_metrics;

/// Days before the compared day that form the baseline.
pub const BASELINE_DAYS: u64 = 7;

/// Relative change, as a fraction of the baseline, that counts as a shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftThresholds {
    pub idle_increase: f64,
    pub distraction_increase: f64,
    pub switching_increase: f64,
    pub score_drop: f64,
}

impl Default for ShiftThresholds {
    fn default() -> Self {
        Self {
            idle_increase: 0.20,
            distraction_increase: 0.20,
            switching_increase: 0.20,
            score_drop: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftMetric {
    Idle,
    Distraction,
    Switching,
    Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricShift {
    pub metric: ShiftMetric,
    pub baseline: f64,
    pub current: f64,
}

impl MetricShift {
    /// Absolute change in percentage points.
    pub fn delta_points(&self) -> f64 {
        (self.current - self.baseline) * 100.0
    }

    pub fn message(&self) -> String {
        let d = self.delta_points().abs();
        match self.metric {
            ShiftMetric::Idle => format!("Idle time increased by {d:.1} points"),
            ShiftMetric::Distraction => format!("Distraction increased by {d:.1} points"),
            ShiftMetric::Switching => format!("App switching increased by {d:.1} points"),
            ShiftMetric::Score => format!("Productivity score dropped {d:.1} points"),
        }
    }
}

/// Compare `current` against `baseline`. Ratios shift upward, the score downward.
pub fn detect_shifts(
    baseline: &ActivityMetrics,
    current: &ActivityMetrics,
    limits: &ShiftThresholds,
) -> Vec<MetricShift> {
    let rising = [
        (ShiftMetric::Idle, baseline.idle_ratio, current.idle_ratio, limits.idle_increase),
        (
            ShiftMetric::Distraction,
            baseline.distraction_ratio,
            current.distraction_ratio,
            limits.distraction_increase,
        ),
        (
            ShiftMetric::Switching,
            baseline.switch_rate,
            current.switch_rate,
            limits.switching_increase,
        ),
    ];

    let mut out: Vec<MetricShift> = rising
        .into_iter()
        .filter(|(_, base, cur, limit)| cur - base > limit * base)
        .map(|(metric, baseline, current, _)| MetricShift {
            metric,
            baseline,
            current,
        })
        .collect();

    if current.avg_score - baseline.avg_score < -limits.score_drop * baseline.avg_score {
        out.push(MetricShift {
            metric: ShiftMetric::Score,
            baseline: baseline.avg_score,
            current: current.avg_score,
        });
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftReport {
    pub day: NaiveDate,
    pub baseline: ActivityMetrics,
    pub current: ActivityMetrics,
    pub shifts: Vec<MetricShift>,
}

/// Compare `day` with the [`BASELINE_DAYS`] before it. `None` when either side
/// has no samples.
pub fn compare_day(
    samples: &[ActivitySample],
    day: NaiveDate,
    limits: &ShiftThresholds,
) -> Option<ShiftReport> {
    let start = day.checked_sub_days(Days::new(BASELINE_DAYS))?;
    let (past, today): (Vec<ActivitySample>, Vec<ActivitySample>) = samples
        .iter()
        .filter(|s| {
            let d = s.timestamp.date();
            d >= start && d <= day
        })
        .cloned()
        .partition(|s| s.timestamp.date() < day);

    let baseline = compute_metrics(&past)?;
    let current = compute_metrics(&today)?;
    let shifts = detect_shifts(&baseline, &current, limits);

    tracing::debug!(%day, shifts = shifts.len(), "compared day against baseline");

    Some(ShiftReport {
        day,
        baseline,
        current,
        shifts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::{disengaging_week, sample};

    fn metrics(idle: f64, distraction: f64, switching: f64, score: f64) -> ActivityMetrics {
        ActivityMetrics {
            idle_ratio: idle,
            distraction_ratio: distraction,
            switch_rate: switching,
            avg_score: score,
        }
    }

    #[test]
    fn test_detect_shifts_relative_to_baseline() {
        let base = metrics(0.20, 0.10, 0.30, 0.80);
        // idle +25%, distraction +10%, switching +50%, score -20%
        let cur = metrics(0.25, 0.11, 0.45, 0.64);
        let shifts = detect_shifts(&base, &cur, &ShiftThresholds::default());
        let kinds: Vec<_> = shifts.iter().map(|s| s.metric).collect();
        assert_eq!(
            kinds,
            vec![ShiftMetric::Idle, ShiftMetric::Switching, ShiftMetric::Score]
        );
        assert_eq!(shifts[2].message(), "Productivity score dropped 16.0 points");
    }

    #[test]
    fn test_small_changes_are_quiet() {
        let base = metrics(0.20, 0.10, 0.30, 0.80);
        let cur = metrics(0.22, 0.11, 0.33, 0.70);
        assert!(detect_shifts(&base, &cur, &ShiftThresholds::default()).is_empty());
    }

    #[test]
    fn test_compare_last_day_of_week() {
        let samples = disengaging_week();
        let day = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
        let report = compare_day(&samples, day, &ShiftThresholds::default()).unwrap();
        // baseline idle (3+7+11+15)/80 = 0.45, today 0.95
        assert!((report.baseline.idle_ratio - 0.45).abs() < 1e-12);
        assert!((report.current.idle_ratio - 0.95).abs() < 1e-12);
        let kinds: Vec<_> = report.shifts.iter().map(|s| s.metric).collect();
        // one window all week: the pooled baseline has a single switch
        assert_eq!(kinds, vec![ShiftMetric::Idle, ShiftMetric::Switching]);
    }

    #[test]
    fn test_compare_needs_both_sides() {
        let samples = vec![sample("2025-06-02 09:00:00", "Terminal", "Active", 80.0)];
        let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert!(compare_day(&samples, day, &ShiftThresholds::default()).is_none());
        let later = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        assert!(compare_day(&samples, later, &ShiftThresholds::default()).is_none());
    }
}
