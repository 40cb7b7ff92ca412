//! Date/time formatting for stored timestamps.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Write;

use crate::sources::{DateTimeFormatter, SourceError};

/// Default display pattern, e.g. "October 19, 2026 14:05:00"
const DEFAULT_PATTERN: &str = "%B %-d, %Y %H:%M:%S";

/// Formats unix-second timestamps in a fixed time zone
#[derive(Debug, Clone)]
pub struct ChronoFormatter<Tz: TimeZone> {
    tz: Tz,
    pattern: String,
}

impl ChronoFormatter<Local> {
    /// Formatter using the machine's local time zone
    pub fn local() -> Self {
        Self::new(Local)
    }
}

impl ChronoFormatter<Utc> {
    pub fn utc() -> Self {
        Self::new(Utc)
    }
}

impl<Tz: TimeZone> ChronoFormatter<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }

    /// Use a custom `strftime` pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }
}

impl<Tz> DateTimeFormatter for ChronoFormatter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    fn format_date_time(&self, raw: &str) -> Result<String, SourceError> {
        if raw.is_empty() {
            return Ok(String::new());
        }

        let secs: i64 = raw
            .parse()
            .map_err(|_| SourceError::InvalidTimestamp(raw.to_string()))?;
        let utc = DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| SourceError::InvalidTimestamp(raw.to_string()))?;

        // `to_string` would panic on a bad pattern
        let mut out = String::new();
        write!(out, "{}", utc.with_timezone(&self.tz).format(&self.pattern))
            .map_err(|_| SourceError::InvalidDateFormat(self.pattern.clone()))?;
        Ok(out)
    }
}
