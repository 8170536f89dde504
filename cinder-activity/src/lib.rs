//! cinder-activity: desktop activity log parser, app classification rules,
//! window/daily aggregation, weekly trends, shifts and risk forecasting

pub mod activity_log;
pub mod app_rules;
pub mod aggregate;
pub mod risk;
pub mod shifts;
pub mod trends;

pub use activity_log::{ActivitySample, parse_activity_csv, parse_activity_reader};
pub use app_rules::{AppClass, classify_app};
pub use aggregate::{
    DailySummary, WindowReport, analyze_window, burnout_series, compute_metrics, daily_summaries,
    recent_window,
};
pub use risk::{RiskForecast, RiskTier, forecast_risk};
pub use shifts::{
    MetricShift, ShiftMetric, ShiftReport, ShiftThresholds, compare_day, detect_shifts,
};
pub use trends::{MetricTrends, TrendAlert, metric_trends, trend_alerts};
