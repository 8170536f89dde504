//! Employee records and the roster view the dashboard filters over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::forecast::{ForecastConfig, ForecastResult, forecast_scores};
use crate::status::{BurnoutStatus, StatusThresholds};

/// One employee as supplied by the HR data feed.
///
/// `days_to_burnout` is a cache of the forecast over `burnout_history`;
/// [`Roster::refresh_forecasts`] rewrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: String,
    pub name: String,
    pub department: String,
    pub role: String,
    pub productivity_score: f64,
    pub burnout_score: f64,
    #[serde(default)]
    pub burnout_history: Vec<f64>,
    pub last_active: DateTime<Utc>,
    #[serde(default)]
    pub goals_completed: u32,
    #[serde(default)]
    pub goals_total: u32,
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Employment status (free text, e.g. "Active", "On Leave").
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub days_to_burnout: Option<u32>,
}

impl EmployeeRecord {
    pub fn forecast(&self, config: &ForecastConfig) -> ForecastResult {
        forecast_scores(&self.burnout_history, config)
    }

    /// Status derived from history, ignoring the cached day count.
    pub fn burnout_status(
        &self,
        config: &ForecastConfig,
        thresholds: &StatusThresholds,
    ) -> BurnoutStatus {
        BurnoutStatus::from_forecast(self.forecast(config), thresholds)
    }

    /// Completed / total goals in 0..=1. Zero goals reads as 0.
    pub fn goal_completion_ratio(&self) -> f64 {
        if self.goals_total == 0 {
            return 0.0;
        }
        (self.goals_completed as f64 / self.goals_total as f64).min(1.0)
    }
}

/// Filter criteria; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterFilter {
    pub department: Option<String>,
    pub status: Option<BurnoutStatus>,
    /// Case-insensitive substring of the employee name.
    pub search: Option<String>,
}

impl RosterFilter {
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_status(mut self, status: BurnoutStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// In-memory collection of employee records plus the forecast settings
/// used to classify them.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: Vec<EmployeeRecord>,
    forecast: ForecastConfig,
    thresholds: StatusThresholds,
}

impl Roster {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self {
            records,
            forecast: ForecastConfig::default(),
            thresholds: StatusThresholds::default(),
        }
    }

    pub fn with_forecast_config(mut self, forecast: ForecastConfig) -> Self {
        self.forecast = forecast;
        self
    }

    pub fn with_thresholds(mut self, thresholds: StatusThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn forecast_config(&self) -> &ForecastConfig {
        &self.forecast
    }

    pub fn thresholds(&self) -> &StatusThresholds {
        &self.thresholds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmployeeRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<EmployeeRecord> {
        self.records
    }

    pub fn find(&self, id: &str) -> Result<&EmployeeRecord, RosterError> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))
    }

    pub fn status_of(&self, record: &EmployeeRecord) -> BurnoutStatus {
        record.burnout_status(&self.forecast, &self.thresholds)
    }

    /// Unique departments in first-seen order.
    pub fn departments(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for r in &self.records {
            if !out.contains(&r.department.as_str()) {
                out.push(&r.department);
            }
        }
        out
    }

    pub fn filter(&self, filter: &RosterFilter) -> Vec<&EmployeeRecord> {
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());

        self.records
            .iter()
            .filter(|r| {
                filter
                    .department
                    .as_ref()
                    .map(|d| &r.department == d)
                    .unwrap_or(true)
            })
            .filter(|r| filter.status.map(|s| self.status_of(r) == s).unwrap_or(true))
            .filter(|r| {
                needle
                    .as_ref()
                    .map(|n| r.name.to_lowercase().contains(n.as_str()))
                    .unwrap_or(true)
            })
            .collect()
    }

    /// Recompute every cached `days_to_burnout`. Returns how many changed.
    pub fn refresh_forecasts(&mut self) -> usize {
        let mut changed = 0;
        for r in &mut self.records {
            let fresh = r.forecast(&self.forecast).days();
            if fresh != r.days_to_burnout {
                tracing::debug!(
                    id = %r.id,
                    cached = ?r.days_to_burnout,
                    fresh = ?fresh,
                    "days-to-burnout cache updated"
                );
                r.days_to_burnout = fresh;
                changed += 1;
            }
        }
        changed
    }
}
