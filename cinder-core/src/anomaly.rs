//! Z-score anomaly detection over a score sequence.

use serde::{Deserialize, Serialize};

use crate::error::AnomalyError;

pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub index: usize,
    pub value: f64,
    pub z_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyScan {
    pub mean: f64,
    /// Sample standard deviation (n - 1).
    pub std_dev: f64,
    pub anomalies: Vec<Anomaly>,
}

impl AnomalyScan {
    /// Lowest and highest anomalous value.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut it = self.anomalies.iter().map(|a| a.value);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// Flag samples whose |z| exceeds `threshold`.
pub fn detect_anomalies(values: &[f64], threshold: f64) -> Result<AnomalyScan, AnomalyError> {
    if values.len() < 2 {
        return Err(AnomalyError::NotEnoughData(values.len()));
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = var.sqrt();

    if std_dev == 0.0 || !std_dev.is_finite() {
        return Err(AnomalyError::NoVariation);
    }

    let anomalies = values
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| {
            let z_score = (value - mean) / std_dev;
            (z_score.abs() > threshold).then_some(Anomaly {
                index,
                value,
                z_score,
            })
        })
        .collect();

    Ok(AnomalyScan {
        mean,
        std_dev,
        anomalies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_outlier() {
        let mut values = vec![50.0; 9];
        values.push(5.0);
        let scan = detect_anomalies(&values, DEFAULT_Z_THRESHOLD).unwrap();
        assert_eq!(scan.anomalies.len(), 1);
        assert_eq!(scan.anomalies[0].index, 9);
        assert!(scan.anomalies[0].z_score < -2.0);
        assert_eq!(scan.value_range(), Some((5.0, 5.0)));
    }

    #[test]
    fn test_no_anomalies_in_gentle_series() {
        let scan = detect_anomalies(&[48.0, 50.0, 52.0, 49.0, 51.0], 2.0).unwrap();
        assert!(scan.anomalies.is_empty());
        assert!((scan.mean - 50.0).abs() < 1e-12);
        assert_eq!(scan.value_range(), None);
    }

    #[test]
    fn test_rejects_flat_and_short() {
        assert_eq!(detect_anomalies(&[7.0, 7.0, 7.0], 2.0), Err(AnomalyError::NoVariation));
        assert_eq!(detect_anomalies(&[7.0], 2.0), Err(AnomalyError::NotEnoughData(1)));
    }
}
