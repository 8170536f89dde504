//! Plain-text and JSON views printed by the CLI.

use cinder_activity::{DailySummary, MetricTrends, ShiftReport, TrendAlert, WindowReport};
use cinder_core::{BurnoutStatus, EmployeeRecord, ForecastResult, Roster};
use serde::Serialize;

/// One dashboard row.
#[derive(Debug, Clone, Serialize)]
pub struct RosterRow {
    pub id: String,
    pub name: String,
    pub department: String,
    pub role: String,
    pub productivity_score: f64,
    pub burnout_score: f64,
    pub forecast: ForecastResult,
    pub status: BurnoutStatus,
}

impl RosterRow {
    pub fn new(roster: &Roster, r: &EmployeeRecord) -> Self {
        let forecast = r.forecast(roster.forecast_config());
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            department: r.department.clone(),
            role: r.role.clone(),
            productivity_score: r.productivity_score,
            burnout_score: r.burnout_score,
            forecast,
            status: BurnoutStatus::from_forecast(forecast, roster.thresholds()),
        }
    }
}

pub fn roster_table(rows: &[RosterRow]) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "{:<6} {:<20} {:<14} {:<20} {:>5} {:>7} {:<18} {}\n",
        "ID", "Name", "Department", "Role", "Prod", "Burnout", "Burnout in", "Status"
    ));
    for r in rows {
        s.push_str(&format!(
            "{:<6} {:<20} {:<14} {:<20} {:>5.0} {:>7.0} {:<18} {}\n",
            r.id,
            truncate(&r.name, 20),
            truncate(&r.department, 14),
            truncate(&r.role, 20),
            r.productivity_score,
            r.burnout_score,
            r.forecast.label(),
            r.status
        ));
    }
    s
}

pub fn window_summary(report: &WindowReport) -> String {
    let m = &report.metrics;
    let mut s = String::new();
    s.push_str(&format!("Samples: {}\n", report.samples));
    s.push_str(&format!("Idle ratio:        {:.3}\n", m.idle_ratio));
    s.push_str(&format!("Distraction ratio: {:.3}\n", m.distraction_ratio));
    s.push_str(&format!("Switch rate:       {:.3}\n", m.switch_rate));
    s.push_str(&format!("Productivity:      {:.1}/100\n", m.avg_score * 100.0));
    s.push_str(&format!(
        "Burnout index:     {:.1} ({} burnout)\n",
        report.index.value, report.index.level
    ));
    s.push_str(&format!("\nFeedback: {}\n", report.productivity.message()));
    for b in &report.behavior {
        s.push_str(&format!("  - {b}\n"));
    }
    if report.alerts.is_empty() {
        s.push_str("\nNo alerts.\n");
    } else {
        s.push_str("\nAlerts:\n");
        for a in &report.alerts {
            s.push_str(&format!("  ! {}\n", a.message()));
        }
    }
    s
}

pub fn daily_table(days: &[DailySummary]) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "{:<10} {:>7} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}  {}\n",
        "Date", "Samples", "Idle", "Distr", "Switch", "Score", "Index", "Risk", "Level"
    ));
    for d in days {
        let m = &d.metrics;
        s.push_str(&format!(
            "{:<10} {:>7} {:>6.3} {:>6.3} {:>6.3} {:>6.1} {:>6.1} {:>6.1}  {}\n",
            d.date,
            d.samples,
            m.idle_ratio,
            m.distraction_ratio,
            m.switch_rate,
            m.avg_score * 100.0,
            d.index.value,
            d.burnout_score(),
            d.index.level
        ));
    }
    s
}

pub fn trend_summary(trends: &MetricTrends, alerts: &[TrendAlert]) -> String {
    let mut s = String::from("\nTrends (last 7 days):\n");
    s.push_str(&format!("  Idle ratio:        {}\n", trends.idle));
    s.push_str(&format!("  Distraction ratio: {}\n", trends.distraction));
    s.push_str(&format!("  Switching rate:    {}\n", trends.switching));
    s.push_str(&format!("  Score:             {}\n", trends.score));
    if alerts.is_empty() {
        s.push_str("All trends are stable.\n");
    }
    for a in alerts {
        s.push_str(&format!("  ! {}\n", a.message()));
    }
    s
}

pub fn shift_summary(report: &ShiftReport) -> String {
    let mut s = format!("\nShifts on {} vs the previous week:\n", report.day);
    if report.shifts.is_empty() {
        s.push_str("  none\n");
    }
    for shift in &report.shifts {
        s.push_str(&format!("  ! {}\n", shift.message()));
    }
    s
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
    t.push('…');
    t
}
