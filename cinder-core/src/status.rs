//! Three-tier burnout status shared by every view that colours employees.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::forecast::ForecastResult;

/// Day-count cut-offs for the status buckets (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    pub critical_days: u32,
    pub warning_days: u32,
}

impl StatusThresholds {
    pub fn new(critical_days: u32, warning_days: u32) -> Result<Self, ConfigError> {
        let t = Self {
            critical_days,
            warning_days,
        };
        t.validate()?;
        Ok(t)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.critical_days > self.warning_days {
            return Err(ConfigError::InvertedStatusThresholds {
                critical: self.critical_days,
                warning: self.warning_days,
            });
        }
        Ok(())
    }
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            critical_days: 5,
            warning_days: 14,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BurnoutStatus {
    Critical,
    Warning,
    Healthy,
}

impl BurnoutStatus {
    /// Bucket a forecast. No finite forecast means no burnout on the horizon.
    pub fn from_forecast(result: ForecastResult, thresholds: &StatusThresholds) -> Self {
        Self::from_days(result.days(), thresholds)
    }

    /// Bucket a (possibly cached) day count.
    pub fn from_days(days: Option<u32>, thresholds: &StatusThresholds) -> Self {
        match days {
            Some(d) if d <= thresholds.critical_days => BurnoutStatus::Critical,
            Some(d) if d <= thresholds.warning_days => BurnoutStatus::Warning,
            _ => BurnoutStatus::Healthy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BurnoutStatus::Critical => "Critical",
            BurnoutStatus::Warning => "Warning",
            BurnoutStatus::Healthy => "Healthy",
        }
    }

    /// Hex colour used by dashboards.
    pub fn color(&self) -> &'static str {
        match self {
            BurnoutStatus::Critical => "#dc2626",
            BurnoutStatus::Warning => "#f59e0b",
            BurnoutStatus::Healthy => "#16a34a",
        }
    }
}

impl fmt::Display for BurnoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BurnoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(BurnoutStatus::Critical),
            "warning" => Ok(BurnoutStatus::Warning),
            "healthy" => Ok(BurnoutStatus::Healthy),
            other => Err(format!(
                "unknown status '{other}' (expected critical, warning or healthy)"
            )),
        }
    }
}
