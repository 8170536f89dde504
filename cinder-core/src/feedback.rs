//! Productivity and behaviour feedback tiers.

use serde::{Deserialize, Serialize};

use crate::wellness::ActivityMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductivityTier {
    Excellent,
    Good,
    Average,
    Low,
}

impl ProductivityTier {
    /// Tier for a 0-100 productivity score.
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            ProductivityTier::Excellent
        } else if score >= 70.0 {
            ProductivityTier::Good
        } else if score >= 50.0 {
            ProductivityTier::Average
        } else {
            ProductivityTier::Low
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ProductivityTier::Excellent => "Excellent focus! Keep up the great work!",
            ProductivityTier::Good => "Good productivity. Try to minimize small distractions.",
            ProductivityTier::Average => "Average focus. Identify what's distracting you.",
            ProductivityTier::Low => "Low productivity. Take a break and reset your mind.",
        }
    }
}

/// Behaviour notes for a window of activity. Never empty.
pub fn behavior_feedback(metrics: &ActivityMetrics) -> Vec<&'static str> {
    let mut out = Vec::new();
    if metrics.idle_ratio > 0.4 {
        out.push("High idle time. Consider short, scheduled breaks to stay active.");
    }
    if metrics.distraction_ratio > 0.3 {
        out.push("A lot of time is going to distracting apps.");
    }
    if metrics.switch_rate > 0.2 {
        out.push("Frequent context switching detected.");
    }
    if out.is_empty() {
        out.push("Great behavioral consistency.");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        assert_eq!(ProductivityTier::from_score(92.0), ProductivityTier::Excellent);
        assert_eq!(ProductivityTier::from_score(85.0), ProductivityTier::Excellent);
        assert_eq!(ProductivityTier::from_score(70.0), ProductivityTier::Good);
        assert_eq!(ProductivityTier::from_score(55.0), ProductivityTier::Average);
        assert_eq!(ProductivityTier::from_score(10.0), ProductivityTier::Low);
    }

    #[test]
    fn test_behavior_feedback() {
        let busy = ActivityMetrics {
            idle_ratio: 0.1,
            distraction_ratio: 0.35,
            switch_rate: 0.25,
            avg_score: 0.6,
        };
        assert_eq!(behavior_feedback(&busy).len(), 2);

        let calm = ActivityMetrics::default();
        assert_eq!(behavior_feedback(&calm), vec!["Great behavioral consistency."]);
    }
}
