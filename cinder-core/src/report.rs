//! Per-employee detail report and its portable text export.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::employee::EmployeeRecord;
use crate::forecast::{ForecastConfig, ForecastResult};
use crate::status::{BurnoutStatus, StatusThresholds};
use crate::time::format_local;
use crate::trend::{TrendDirection, detect_trend};

/// Samples shown in the detail trend chart.
pub const CHART_WINDOW: usize = 7;

/// Whitespace and path separators; neither may survive into a file name.
static UNSAFE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s/\\]+").expect("static regex"));

/// Everything the detail view needs, computed once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeReport {
    pub id: String,
    pub name: String,
    pub department: String,
    pub role: String,
    pub employment_status: String,
    pub last_active: DateTime<Utc>,
    pub productivity_score: f64,
    pub burnout_score: f64,
    pub forecast: ForecastResult,
    pub status: BurnoutStatus,
    pub goals_completed: u32,
    pub goals_total: u32,
    pub goal_ratio: f64,
    pub chart_window: Vec<f64>,
    pub trend: TrendDirection,
    pub suggestions: Vec<String>,
}

impl EmployeeReport {
    pub fn build(
        record: &EmployeeRecord,
        config: &ForecastConfig,
        thresholds: &StatusThresholds,
    ) -> Self {
        let forecast = record.forecast(config);
        let start = record.burnout_history.len().saturating_sub(CHART_WINDOW);
        let chart_window = record.burnout_history[start..].to_vec();
        let trend = detect_trend(&chart_window);

        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            department: record.department.clone(),
            role: record.role.clone(),
            employment_status: record.status.clone(),
            last_active: record.last_active,
            productivity_score: record.productivity_score,
            burnout_score: record.burnout_score,
            forecast,
            status: BurnoutStatus::from_forecast(forecast, thresholds),
            goals_completed: record.goals_completed,
            goals_total: record.goals_total,
            goal_ratio: record.goal_completion_ratio(),
            chart_window,
            trend,
            suggestions: record.suggestions.clone(),
        }
    }

    /// File name for the text export of this report.
    pub fn file_name(&self) -> String {
        export_file_name(&self.name, "md")
    }

    /// Render a self-contained markdown document.
    pub fn render_markdown(&self, tz: Tz) -> String {
        let mut s = String::new();
        s.push_str(&format!("# {}\n\n", self.name));
        s.push_str(&format!("- Department: {}\n", self.department));
        s.push_str(&format!("- Role: {}\n", self.role));
        s.push_str(&format!("- Status: {}\n", self.employment_status));
        s.push_str(&format!(
            "- Estimated burnout: {} ({})\n",
            self.forecast.label(),
            self.status
        ));
        s.push_str(&format!("- Last active: {}\n", format_local(self.last_active, tz)));
        s.push_str(&format!("- Productivity: {:.0}/100\n", self.productivity_score));
        s.push_str(&format!("- Burnout score: {:.0}/100\n\n", self.burnout_score));

        s.push_str("## Goal progress\n\n");
        s.push_str(&format!(
            "{}/{} goals completed ({:.0}%)\n\n",
            self.goals_completed,
            self.goals_total,
            self.goal_ratio * 100.0
        ));

        s.push_str(&format!("## Burnout trend (last {CHART_WINDOW} days)\n\n"));
        if self.chart_window.is_empty() {
            s.push_str("(no history)\n\n");
        } else {
            for (i, score) in self.chart_window.iter().enumerate() {
                s.push_str(&format!("{:>2} | {:<20} {:.0}\n", i + 1, bar(*score), score));
            }
            s.push_str(&format!("\nDirection: {}\n\n", self.trend));
        }

        s.push_str("## Suggestions\n\n");
        if self.suggestions.is_empty() {
            s.push_str("(none)\n");
        }
        for item in &self.suggestions {
            s.push_str(&format!("- {item}\n"));
        }
        s
    }
}

/// `"Ada  Lovelace"` -> `"Ada_Lovelace_Report.<ext>"`. Separators become `_`
/// too, so the result is always a single path component.
pub fn export_file_name(name: &str, extension: &str) -> String {
    let stem = UNSAFE_RUN.replace_all(name.trim(), "_");
    format!("{stem}_Report.{extension}")
}

/// 0-100 score as a bar of up to 20 cells.
fn bar(score: f64) -> String {
    let cells = (score.clamp(0.0, 100.0) / 5.0).round() as usize;
    "#".repeat(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::tests::employee;

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Ada Lovelace", "pdf"), "Ada_Lovelace_Report.pdf");
        assert_eq!(
            export_file_name("  Mary   Jane\tWatson ", "md"),
            "Mary_Jane_Watson_Report.md"
        );
    }

    #[test]
    fn test_export_file_name_strips_separators() {
        assert_eq!(export_file_name("../../etc/passwd", "md"), ".._.._etc_passwd_Report.md");
        assert_eq!(export_file_name("A\\B / C", "md"), "A_B_C_Report.md");

        let name = export_file_name("../x", "md");
        let p = std::path::Path::new("out").join(&name);
        assert_eq!(p.parent(), Some(std::path::Path::new("out")));
        assert_eq!(p.components().count(), 2);
    }

    #[test]
    fn test_chart_window_is_trailing_seven() {
        let history: Vec<f64> = (1..=10).map(|i| i as f64 * 5.0).collect();
        let rec = employee("e1", "Alice Moreno", "Engineering", &history);
        let report = EmployeeReport::build(
            &rec,
            &ForecastConfig::default(),
            &StatusThresholds::default(),
        );
        assert_eq!(report.chart_window, vec![20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0]);
        assert_eq!(report.trend, TrendDirection::Upward);
        // rate 5, current 50, threshold 80 -> 6 days
        assert_eq!(report.forecast, ForecastResult::Days(6));
        assert_eq!(report.status, BurnoutStatus::Warning);
        assert_eq!(report.file_name(), "Alice_Moreno_Report.md");
    }

    #[test]
    fn test_render_markdown_sections() {
        let rec = employee("e2", "Bob Chen", "Design", &[40.0, 50.0, 60.0, 70.0]);
        let report = EmployeeReport::build(
            &rec,
            &ForecastConfig::default(),
            &StatusThresholds::default(),
        );
        let md = report.render_markdown(chrono_tz::UTC);
        assert!(md.starts_with("# Bob Chen\n"));
        assert!(md.contains("- Estimated burnout: 1 day (Critical)"));
        assert!(md.contains("3/5 goals completed (60%)"));
        assert!(md.contains("- Last active: 2025-06-02 14:30 UTC"));
        assert!(md.contains("- Take a break"));
        assert!(md.contains("Direction: Upward"));
    }

    #[test]
    fn test_render_without_history() {
        let mut rec = employee("e3", "Dan", "Sales", &[]);
        rec.suggestions.clear();
        let report = EmployeeReport::build(
            &rec,
            &ForecastConfig::default(),
            &StatusThresholds::default(),
        );
        let md = report.render_markdown(chrono_tz::UTC);
        assert!(md.contains("(no history)"));
        assert!(md.contains("(none)"));
        assert!(md.contains("insufficient data (Healthy)"));
    }
}
