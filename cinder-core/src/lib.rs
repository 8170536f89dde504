//! cinder-core: burnout forecasting and HR analytics primitives

pub mod anomaly;
pub mod employee;
pub mod error;
pub mod feedback;
pub mod forecast;
pub mod report;
pub mod status;
pub mod time;
pub mod trend;
pub mod wellness;

pub use anomaly::{Anomaly, AnomalyScan, detect_anomalies};
pub use employee::{EmployeeRecord, Roster, RosterFilter};
pub use error::{AnomalyError, ConfigError, RosterError};
pub use feedback::{ProductivityTier, behavior_feedback};
pub use forecast::{
    BurnoutForecaster, ForecastConfig, ForecastResult, ScoreSeries, forecast, forecast_scores,
};
pub use report::{EmployeeReport, export_file_name};
pub use status::{BurnoutStatus, StatusThresholds};
pub use time::{format_local, parse_timezone};
pub use trend::{TrendDirection, detect_trend};
pub use wellness::{
    ActivityAlert, ActivityMetrics, AlertThresholds, BurnoutIndex, BurnoutLevel, IndexWeights,
    RiskWeights, burnout_index, burnout_risk, check_alerts,
};
