//! Time utilities: timezone-aware rendering of timestamps.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::ConfigError;

/// Parse an IANA zone name like "America/Chicago".
pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.parse()
        .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))
}

/// Render a UTC instant in `tz`, e.g. "2025-06-02 09:30 CDT".
pub fn format_local(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%Y-%m-%d %H:%M %Z").to_string()
}
