//! Typed errors for the analytics core.

/// Invalid forecast or status configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Forecast window cannot produce a rate
    #[error("forecast window must be at least 2 samples, got {0}")]
    WindowTooSmall(usize),

    /// Threshold is NaN or infinite
    #[error("forecast threshold must be a finite number")]
    NonFiniteThreshold,

    /// Status buckets overlap
    #[error("critical bucket ({critical} days) must not exceed warning bucket ({warning} days)")]
    InvertedStatusThresholds { critical: u32, warning: u32 },

    /// Not an IANA timezone name
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Roster lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("employee not found: {0}")]
    NotFound(String),
}

/// Reasons an anomaly scan cannot run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AnomalyError {
    #[error("need at least 2 samples for anomaly detection, got {0}")]
    NotEnoughData(usize),

    #[error("not enough variation in samples for anomaly detection")]
    NoVariation,
}
