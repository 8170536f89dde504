//! Parse desktop activity logs into typed samples.
//!
//! Expected header (case and surrounding whitespace ignored, extra columns allowed):
//! Timestamp,Active Window,Status,Score

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// One row of the activity log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivitySample {
    pub timestamp: NaiveDateTime,
    pub active_window: String,
    /// "Active" / "Idle" as written by the tracker.
    pub status: String,
    /// Productivity score, 0-100.
    pub score: f64,
}

impl ActivitySample {
    pub fn is_idle(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("idle")
    }
}

const REQUIRED: [&str; 4] = ["timestamp", "active window", "status", "score"];

/// Parse an activity log file. Samples are returned in timestamp order.
pub fn parse_activity_csv(path: impl AsRef<Path>) -> Result<Vec<ActivitySample>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_activity_reader(file).with_context(|| format!("parsing {}", path.as_ref().display()))
}

pub fn parse_activity_reader<R: Read>(reader: R) -> Result<Vec<ActivitySample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut idx = [0usize; 4];
    for (slot, name) in idx.iter_mut().zip(REQUIRED) {
        match headers.iter().position(|h| h == name) {
            Some(i) => *slot = i,
            None => bail!("activity log is missing required column '{name}'"),
        }
    }
    let [ts_i, window_i, status_i, score_i] = idx;

    let mut out = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.records() {
        let record = result?;

        let Some(timestamp) = record.get(ts_i).and_then(parse_timestamp) else {
            skipped += 1;
            continue;
        };

        let score = record
            .get(score_i)
            .and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(0.0);

        out.push(ActivitySample {
            timestamp,
            active_window: record.get(window_i).unwrap_or("").trim().to_string(),
            status: record.get(status_i).unwrap_or("").trim().to_string(),
            score,
        });
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped activity rows with unparseable timestamps");
    }

    out.sort_by_key(|s| s.timestamp);
    Ok(out)
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_log() {
        let csv = "\
Timestamp, Active Window ,Status,CPU_Usage,Score
2025-06-02 09:00:05,Visual Studio Code,Active,12.5,82
2025-06-02 09:00:00,Google Chrome,Active,8.0,78
not-a-date,Terminal,Active,1.0,90
2025-06-02T09:00:10,YouTube,Idle,3.1,
";
        let samples = parse_activity_reader(csv.as_bytes()).unwrap();
        assert_eq!(samples.len(), 3);
        // sorted by timestamp
        assert_eq!(samples[0].active_window, "Google Chrome");
        assert_eq!(samples[1].score, 82.0);
        assert!(samples[2].is_idle());
        assert_eq!(samples[2].score, 0.0);
    }

    #[test]
    fn test_parse_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("log.csv");
        std::fs::write(
            &p,
            "timestamp,active window,status,score\n\
             2025-06-02 09:05,Terminal,Idle,40\n\
             2025-06-02 09:00,Terminal,Active,90\n",
        )
        .unwrap();

        let samples = parse_activity_csv(&p).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].score, 90.0);
        assert!(samples[1].is_idle());

        let err = parse_activity_csv(dir.path().join("missing.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("missing.csv"));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "timestamp,status,score\n2025-06-02 09:00:00,Active,50\n";
        let err = parse_activity_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("active window"));
    }

    #[test]
    fn test_rfc3339_timestamps() {
        let ts = parse_timestamp("2025-06-02T09:30:00-05:00").unwrap();
        assert_eq!(ts.to_string(), "2025-06-02 09:30:00");
        assert!(parse_timestamp("yesterday").is_none());
    }
}
