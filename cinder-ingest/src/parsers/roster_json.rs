//! Employee roster JSON (array of camelCase employee objects).
//!
//! ```json
//! [{"id": "1", "name": "Ava Patel", "department": "Engineering", "role": "SWE",
//!   "productivityScore": 78, "burnoutScore": 62, "burnoutHistory": [50, 55, 62],
//!   "lastActive": "2025-06-01T09:15:00Z", "goalsCompleted": 3, "goalsTotal": 5,
//!   "suggestions": [], "status": "Active", "daysToBurnout": 4}]
//! ```

use anyhow::{Context, Result};
use cinder_core::{EmployeeRecord, Roster};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::types::{IssueKind, RosterIssue};

/// Parse roster JSON text.
pub fn parse_roster_json(text: &str) -> Result<Vec<EmployeeRecord>> {
    let records: Vec<EmployeeRecord> =
        serde_json::from_str(text).context("parse employee roster JSON")?;
    Ok(records)
}

/// Read and parse a roster file. Data-quality issues are logged, not fatal.
pub fn load_roster(path: impl AsRef<Path>) -> Result<Roster> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let records =
        parse_roster_json(&text).with_context(|| format!("parsing {}", path.display()))?;

    for issue in validate_records(&records) {
        tracing::warn!(%issue, "roster data issue");
    }
    tracing::debug!(count = records.len(), path = %path.display(), "roster loaded");

    Ok(Roster::new(records))
}

/// Check ids are unique, scores sit in 0..=100, and goal counts are consistent.
pub fn validate_records(records: &[EmployeeRecord]) -> Vec<RosterIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for r in records {
        if !seen.insert(r.id.as_str()) {
            issues.push(RosterIssue {
                employee_id: r.id.clone(),
                kind: IssueKind::DuplicateId,
                detail: format!("id '{}' appears more than once", r.id),
            });
        }

        let mut scores = [r.productivity_score, r.burnout_score]
            .into_iter()
            .chain(r.burnout_history.iter().copied());
        if let Some(bad) = scores.find(|s| !(0.0..=100.0).contains(s)) {
            issues.push(RosterIssue {
                employee_id: r.id.clone(),
                kind: IssueKind::ScoreOutOfRange,
                detail: format!("score {bad} outside 0-100"),
            });
        }

        if r.goals_completed > r.goals_total {
            issues.push(RosterIssue {
                employee_id: r.id.clone(),
                kind: IssueKind::GoalsExceedTotal,
                detail: format!("{} of {} goals completed", r.goals_completed, r.goals_total),
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO: &str = r#"[
      {"id": "1", "name": "Ava Patel", "department": "Engineering", "role": "SWE",
       "productivityScore": 78, "burnoutScore": 62, "burnoutHistory": [50, 55, 62],
       "lastActive": "2025-06-01T09:15:00Z", "goalsCompleted": 3, "goalsTotal": 5,
       "suggestions": ["Pair on reviews"], "status": "Active", "daysToBurnout": 4},
      {"id": "2", "name": "Leo Park", "department": "Support", "role": "Agent",
       "productivityScore": 64, "burnoutScore": 40,
       "lastActive": "2025-06-01T18:00:00Z", "status": "On Leave"}
    ]"#;

    #[test]
    fn test_parse_with_optional_fields() {
        let records = parse_roster_json(TWO).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].burnout_history, vec![50.0, 55.0, 62.0]);
        assert_eq!(records[1].days_to_burnout, None);
        assert!(records[1].burnout_history.is_empty());
        assert!(validate_records(&records).is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_required() {
        let err = parse_roster_json(r#"[{"id": "1"}]"#).unwrap_err();
        assert!(err.to_string().contains("roster"));
    }

    #[test]
    fn test_validate_flags_issues() {
        let mut records = parse_roster_json(TWO).unwrap();
        records[1].id = "1".to_string();
        records[1].burnout_history = vec![20.0, 140.0];
        records[1].goals_completed = 9;

        let kinds: Vec<_> = validate_records(&records).iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::DuplicateId,
                IssueKind::ScoreOutOfRange,
                IssueKind::GoalsExceedTotal
            ]
        );
    }

    #[test]
    fn test_load_roster_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO.as_bytes()).unwrap();
        let roster = load_roster(file.path()).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.find("2").unwrap().name, "Leo Park");
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = load_roster("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
