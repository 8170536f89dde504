//! cinder-ingest: loading employee rosters into the analytics core.

pub mod types;
pub mod parsers;

pub use types::{RosterIssue, IssueKind};
pub use parsers::roster_json::{load_roster, parse_roster_json, validate_records};
