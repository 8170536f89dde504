//! Aggregation: activity samples -> metrics, burnout index, alerts, and a
//! daily burnout risk series for forecasting.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use cinder_core::{
    ActivityAlert, ActivityMetrics, AlertThresholds, BurnoutIndex, IndexWeights, ProductivityTier,
    RiskWeights, ScoreSeries, behavior_feedback, burnout_index, burnout_risk, check_alerts,
};
use serde::{Deserialize, Serialize};

use crate::activity_log::ActivitySample;
use crate::app_rules::{AppClass, classify_app};

/// Metrics over `samples` (assumed in timestamp order). `None` when empty.
pub fn compute_metrics(samples: &[ActivitySample]) -> Option<ActivityMetrics> {
    if samples.is_empty() {
        return None;
    }
    let total = samples.len() as f64;

    let idle = samples.iter().filter(|s| s.is_idle()).count();
    let distracted = samples
        .iter()
        .filter(|s| classify_app(&s.active_window) == AppClass::Distraction)
        .count();
    // The first sample always counts as a switch.
    let switches = 1 + samples
        .windows(2)
        .filter(|w| w[0].active_window != w[1].active_window)
        .count();
    let score_sum: f64 = samples.iter().map(|s| s.score).sum();

    Some(ActivityMetrics {
        idle_ratio: idle as f64 / total,
        distraction_ratio: distracted as f64 / total,
        switch_rate: switches as f64 / total,
        avg_score: score_sum / total / 100.0,
    })
}

/// Samples at or after `now - hours`. Input must be sorted by timestamp.
pub fn recent_window(
    samples: &[ActivitySample],
    now: NaiveDateTime,
    hours: i64,
) -> &[ActivitySample] {
    let cutoff = now - Duration::hours(hours);
    let start = samples.partition_point(|s| s.timestamp < cutoff);
    &samples[start..]
}

/// Everything reported for one analysis window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowReport {
    pub samples: usize,
    pub metrics: ActivityMetrics,
    pub index: BurnoutIndex,
    pub alerts: Vec<ActivityAlert>,
    pub productivity: ProductivityTier,
    pub behavior: Vec<String>,
}

pub fn analyze_window(
    samples: &[ActivitySample],
    weights: &IndexWeights,
    limits: &AlertThresholds,
) -> Option<WindowReport> {
    let metrics = compute_metrics(samples)?;
    let index = burnout_index(&metrics, weights);
    let alerts = check_alerts(&metrics, limits);

    tracing::debug!(
        samples = samples.len(),
        index = index.value,
        alerts = alerts.len(),
        "activity window analyzed"
    );

    Some(WindowReport {
        samples: samples.len(),
        metrics,
        index,
        alerts,
        productivity: ProductivityTier::from_score(metrics.avg_score * 100.0),
        behavior: behavior_feedback(&metrics)
            .into_iter()
            .map(String::from)
            .collect(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub samples: usize,
    pub metrics: ActivityMetrics,
    pub index: BurnoutIndex,
    /// Burnout risk in 0..1.
    pub risk: f64,
}

impl DailySummary {
    /// Risk as a 0-100 burnout score, one decimal.
    pub fn burnout_score(&self) -> f64 {
        (self.risk * 1000.0).round() / 10.0
    }
}

/// One summary per calendar day, oldest first. Input must be sorted.
pub fn daily_summaries(
    samples: &[ActivitySample],
    index_weights: &IndexWeights,
    risk_weights: &RiskWeights,
) -> Vec<DailySummary> {
    samples
        .chunk_by(|a, b| a.timestamp.date() == b.timestamp.date())
        .filter_map(|day| {
            let metrics = compute_metrics(day)?;
            Some(DailySummary {
                date: day[0].timestamp.date(),
                samples: day.len(),
                metrics,
                index: burnout_index(&metrics, index_weights),
                risk: burnout_risk(&metrics, risk_weights),
            })
        })
        .collect()
}

/// Daily burnout scores for the forecaster; they rise as behaviour degrades.
pub fn burnout_series(days: &[DailySummary]) -> ScoreSeries {
    days.iter().map(DailySummary::burnout_score).collect()
}
