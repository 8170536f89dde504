use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    DuplicateId,
    ScoreOutOfRange,
    GoalsExceedTotal,
}

/// A data-quality problem found in a roster. Records are still loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterIssue {
    pub employee_id: String,
    pub kind: IssueKind,
    pub detail: String,
}

impl fmt::Display for RosterIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{:?}]: {}", self.employee_id, self.kind, self.detail)
    }
}
