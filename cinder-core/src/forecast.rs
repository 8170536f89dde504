//! Burnout forecasting: trailing-window linear-rate extrapolation.
//!
//! Given a daily series of burnout scores, estimate how many whole days remain
//! until the score crosses a threshold if the recent average daily change holds.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of trailing samples used to estimate the rate.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Default score considered "burnout".
pub const DEFAULT_THRESHOLD: f64 = 80.0;

/// Ordered daily burnout scores (0-100), oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreSeries(Vec<f64>);

impl ScoreSeries {
    pub fn new(scores: Vec<f64>) -> Self {
        Self(scores)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent score, if any.
    pub fn latest(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// The last `n` samples (or all of them when shorter), in original order.
    pub fn trailing(&self, n: usize) -> &[f64] {
        trailing(&self.0, n)
    }
}

impl From<Vec<f64>> for ScoreSeries {
    fn from(scores: Vec<f64>) -> Self {
        Self(scores)
    }
}

impl FromIterator<f64> for ScoreSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Forecast parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Trailing samples used to estimate the trend. Must be >= 2.
    pub window_size: usize,
    /// Score at or above which the employee is considered burnt out.
    pub threshold: f64,
}

impl ForecastConfig {
    /// Build a validated config.
    pub fn new(window_size: usize, threshold: f64) -> Result<Self, ConfigError> {
        let cfg = Self {
            window_size,
            threshold,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Check invariants. Deserialized configs should go through this.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // A single-sample window has no deltas to average.
        if self.window_size < 2 {
            return Err(ConfigError::WindowTooSmall(self.window_size));
        }
        if !self.threshold.is_finite() {
            return Err(ConfigError::NonFiniteThreshold);
        }
        Ok(())
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Outcome of a burnout forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum ForecastResult {
    /// Whole days until the threshold is reached. `0` means already reached.
    Days(u32),
    /// Fewer than two samples; no rate can be estimated.
    InsufficientData,
    /// Flat or improving trend; no crossing in finite time.
    NoRisingTrend,
}

impl ForecastResult {
    /// Day count, when a finite forecast exists.
    pub fn days(&self) -> Option<u32> {
        match self {
            ForecastResult::Days(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, ForecastResult::Days(_))
    }

    /// Short human label, e.g. "3 days" or "no rising trend".
    pub fn label(&self) -> String {
        match self {
            ForecastResult::Days(0) => "threshold reached".to_string(),
            ForecastResult::Days(1) => "1 day".to_string(),
            ForecastResult::Days(d) => format!("{d} days"),
            ForecastResult::InsufficientData => "insufficient data".to_string(),
            ForecastResult::NoRisingTrend => "no rising trend".to_string(),
        }
    }
}

/// Stateless forecaster. Cheap to copy; safe to share across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BurnoutForecaster {
    config: ForecastConfig,
}

impl BurnoutForecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn forecast(&self, series: &ScoreSeries) -> ForecastResult {
        forecast_scores(series.as_slice(), &self.config)
    }
}

/// Forecast days until `series` crosses `config.threshold`.
pub fn forecast(series: &ScoreSeries, config: &ForecastConfig) -> ForecastResult {
    forecast_scores(series.as_slice(), config)
}

/// Slice form of [`forecast`], for callers holding raw history.
///
/// A config that skipped [`ForecastConfig::validate`] with a non-finite
/// threshold has nothing to cross and yields `InsufficientData`.
pub fn forecast_scores(scores: &[f64], config: &ForecastConfig) -> ForecastResult {
    if scores.len() < 2 || !config.threshold.is_finite() {
        return ForecastResult::InsufficientData;
    }

    let window = trailing(scores, config.window_size);
    let Some(rate) = average_rate(window) else {
        return ForecastResult::InsufficientData;
    };

    // NaN rates fall through here as well.
    if !(rate > 0.0) {
        return ForecastResult::NoRisingTrend;
    }

    let current = window[window.len() - 1];
    let days = ((config.threshold - current) / rate).ceil();
    if days > 0.0 {
        // Float-to-int `as` saturates.
        ForecastResult::Days(days as u32)
    } else {
        ForecastResult::Days(0)
    }
}

/// Mean of first differences across `window`. `None` for fewer than two samples.
pub fn average_rate(window: &[f64]) -> Option<f64> {
    if window.len() < 2 {
        return None;
    }
    let total: f64 = window.windows(2).map(|w| w[1] - w[0]).sum();
    Some(total / (window.len() - 1) as f64)
}

fn trailing(scores: &[f64], n: usize) -> &[f64] {
    let start = scores.len().saturating_sub(n);
    &scores[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(window_size: usize, threshold: f64) -> ForecastConfig {
        ForecastConfig::new(window_size, threshold).unwrap()
    }

    #[test]
    fn test_steady_rise_below_threshold() {
        let series = ScoreSeries::new(vec![40.0, 50.0, 60.0, 70.0]);
        assert_eq!(forecast(&series, &cfg(5, 80.0)), ForecastResult::Days(1));
    }

    #[test]
    fn test_falling_trend_has_no_forecast() {
        let series = ScoreSeries::new(vec![70.0, 65.0, 60.0]);
        assert_eq!(forecast(&series, &cfg(5, 75.0)), ForecastResult::NoRisingTrend);
        assert_eq!(forecast(&series, &cfg(5, 99.0)), ForecastResult::NoRisingTrend);
    }

    #[test]
    fn test_flat_trend_has_no_forecast() {
        let series = ScoreSeries::new(vec![50.0, 50.0, 50.0]);
        assert_eq!(forecast(&series, &cfg(5, 80.0)), ForecastResult::NoRisingTrend);
    }

    #[test]
    fn test_single_sample_is_insufficient() {
        let series = ScoreSeries::new(vec![90.0]);
        assert_eq!(forecast(&series, &cfg(5, 80.0)), ForecastResult::InsufficientData);
        assert_eq!(
            forecast(&ScoreSeries::default(), &ForecastConfig::default()),
            ForecastResult::InsufficientData
        );
    }

    #[test]
    fn test_already_over_threshold_is_zero() {
        let series = ScoreSeries::new(vec![85.0, 86.0]);
        assert_eq!(forecast(&series, &cfg(5, 80.0)), ForecastResult::Days(0));
    }

    #[test]
    fn test_window_uses_only_trailing_samples() {
        let series = ScoreSeries::new(vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        assert_eq!(series.trailing(5), &[20.0, 30.0, 40.0, 50.0, 60.0]);
        assert_eq!(forecast(&series, &cfg(5, 100.0)), ForecastResult::Days(4));
    }

    #[test]
    fn test_old_spike_outside_window_is_ignored() {
        // Full-history mean delta is negative; the trailing window rises.
        let series = ScoreSeries::new(vec![95.0, 10.0, 20.0, 30.0]);
        assert_eq!(forecast(&series, &cfg(3, 50.0)), ForecastResult::Days(2));
        assert_eq!(forecast(&series, &cfg(5, 50.0)), ForecastResult::NoRisingTrend);
    }

    #[test]
    fn test_partial_days_round_up() {
        // rate 3, gap 10 -> 3.33 -> 4
        let series = ScoreSeries::new(vec![64.0, 67.0, 70.0]);
        assert_eq!(forecast(&series, &cfg(5, 80.0)), ForecastResult::Days(4));
    }

    #[test]
    fn test_steeper_rate_never_increases_days() {
        let config = cfg(5, 90.0);
        let mut last = u32::MAX;
        for step in 1..=20 {
            let step = step as f64;
            let series: ScoreSeries = (0..5).map(|i| 10.0 + step * i as f64).collect();
            let days = forecast(&series, &config).days().unwrap();
            assert!(days <= last, "step {step}: {days} > {last}");
            last = days;
        }
    }

    #[test]
    fn test_forecast_is_pure() {
        let series = ScoreSeries::new(vec![12.0, 18.5, 21.0, 33.0]);
        let config = cfg(4, 75.0);
        assert_eq!(forecast(&series, &config), forecast(&series, &config));
    }

    #[test]
    fn test_nan_rate_is_no_rising_trend() {
        let series = ScoreSeries::new(vec![10.0, f64::NAN, 30.0]);
        assert_eq!(forecast(&series, &cfg(5, 80.0)), ForecastResult::NoRisingTrend);
    }

    #[test]
    fn test_unvalidated_non_finite_threshold() {
        let series = ScoreSeries::new(vec![10.0, 20.0, 30.0]);
        for threshold in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let config = ForecastConfig {
                window_size: 5,
                threshold,
            };
            assert_eq!(forecast(&series, &config), ForecastResult::InsufficientData);
        }
    }

    #[test]
    fn test_tiny_rate_saturates() {
        let series = ScoreSeries::new(vec![0.0, 1e-300]);
        assert_eq!(forecast(&series, &cfg(5, 80.0)), ForecastResult::Days(u32::MAX));
    }

    #[test]
    fn test_forecaster_struct_matches_free_fn() {
        let config = cfg(3, 60.0);
        let f = BurnoutForecaster::new(config);
        let series = ScoreSeries::new(vec![20.0, 30.0, 45.0, 50.0]);
        assert_eq!(f.forecast(&series), forecast(&series, &config));
        assert_eq!(f.config().window_size, 3);
    }

    #[test]
    fn test_config_validation() {
        assert!(ForecastConfig::new(1, 80.0).is_err());
        assert!(ForecastConfig::new(0, 80.0).is_err());
        assert!(ForecastConfig::new(5, f64::INFINITY).is_err());
        assert!(ForecastConfig::default().validate().is_ok());
    }

    #[test]
    fn test_result_serde_shape() {
        let json = serde_json::to_string(&ForecastResult::Days(3)).unwrap();
        assert_eq!(json, r#"{"kind":"days","days":3}"#);
        let json = serde_json::to_string(&ForecastResult::NoRisingTrend).unwrap();
        assert_eq!(json, r#"{"kind":"no_rising_trend"}"#);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ForecastResult::Days(0).label(), "threshold reached");
        assert_eq!(ForecastResult::Days(1).label(), "1 day");
        assert_eq!(ForecastResult::Days(9).label(), "9 days");
        assert_eq!(ForecastResult::InsufficientData.label(), "insufficient data");
    }
}
