//! Horizon forecast from the averaged daily risk of the last week.

use cinder_core::{ActivityMetrics, RiskWeights, burnout_risk};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregate::DailySummary;

/// Days of data required before a horizon forecast is made.
pub const MIN_RISK_DAYS: usize = 5;
/// Trailing days averaged into the risk.
pub const RISK_WINDOW_DAYS: usize = 7;
/// Days until burnout at zero risk.
pub const RISK_HORIZON_DAYS: f64 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// 3 days or fewer.
    Immediate,
    /// 7 days or fewer.
    Approaching,
    Stable,
}

impl RiskTier {
    pub fn from_days(days: u32) -> Self {
        if days <= 3 {
            RiskTier::Immediate
        } else if days <= 7 {
            RiskTier::Approaching
        } else {
            RiskTier::Stable
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RiskTier::Immediate => "Immediate intervention recommended.",
            RiskTier::Approaching => "Trend indicates mid-level burnout approaching.",
            RiskTier::Stable => "Stable zone. Keep it up!",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTier::Immediate => "Immediate",
            RiskTier::Approaching => "Approaching",
            RiskTier::Stable => "Stable",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskForecast {
    /// Days that fed the average.
    pub days_used: usize,
    /// Mean of the per-day metrics over those days.
    pub metrics: ActivityMetrics,
    pub risk: f64,
    pub days_until_burnout: u32,
    pub tier: RiskTier,
}

/// `None` with fewer than [`MIN_RISK_DAYS`] days.
pub fn forecast_risk(days: &[DailySummary], weights: &RiskWeights) -> Option<RiskForecast> {
    if days.len() < MIN_RISK_DAYS {
        return None;
    }
    let recent = &days[days.len().saturating_sub(RISK_WINDOW_DAYS)..];
    let metrics = mean_metrics(recent);
    let risk = burnout_risk(&metrics, weights);
    // risk is clamped to 0..1, so this stays within 0..=14
    let days_until_burnout = ((1.0 - risk) * RISK_HORIZON_DAYS) as u32;

    tracing::debug!(days = recent.len(), risk, days_until_burnout, "risk forecast");

    Some(RiskForecast {
        days_used: recent.len(),
        metrics,
        risk,
        days_until_burnout,
        tier: RiskTier::from_days(days_until_burnout),
    })
}

fn mean_metrics(days: &[DailySummary]) -> ActivityMetrics {
    let n = days.len() as f64;
    let mut m = ActivityMetrics::default();
    for d in days {
        m.idle_ratio += d.metrics.idle_ratio;
        m.distraction_ratio += d.metrics.distraction_ratio;
        m.switch_rate += d.metrics.switch_rate;
        m.avg_score += d.metrics.avg_score;
    }
    ActivityMetrics {
        idle_ratio: m.idle_ratio / n,
        distraction_ratio: m.distraction_ratio / n,
        switch_rate: m.switch_rate / n,
        avg_score: m.avg_score / n,
    }
}
