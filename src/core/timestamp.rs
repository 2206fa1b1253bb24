//! Timestamp formatting utilities
//!
//! Sinks may prefix every line with the time it was written.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use rust_logger_pipeline::core::TimestampFormat;
///
/// let format = TimestampFormat::Custom("%Y-%m-%d".to_string());
/// assert_eq!(format.format_now().len(), 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// Local time, second precision: `2025/01/08 10:30:45`
    #[default]
    Standard,

    /// ISO 8601 UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Custom strftime format, rendered in local time
    Custom(String),
}

impl TimestampFormat {
    /// Format a UTC instant according to this format
    pub fn format(&self, dt: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Standard => dt
                .with_timezone(&Local)
                .format("%Y/%m/%d %H:%M:%S")
                .to_string(),
            TimestampFormat::Iso8601 => dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => dt.to_rfc3339(),
            TimestampFormat::Unix => dt.timestamp().to_string(),
            TimestampFormat::Custom(fmt) => dt.with_timezone(&Local).format(fmt).to_string(),
        }
    }

    pub fn format_now(&self) -> String {
        self.format(&Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap()
    }

    #[test]
    fn test_iso8601() {
        assert_eq!(
            TimestampFormat::Iso8601.format(&fixed()),
            "2025-01-08T10:30:45.000Z"
        );
    }

    #[test]
    fn test_rfc3339_and_unix() {
        assert_eq!(
            TimestampFormat::Rfc3339.format(&fixed()),
            "2025-01-08T10:30:45+00:00"
        );
        assert_eq!(TimestampFormat::Unix.format(&fixed()), "1736332245");
    }

    #[test]
    fn test_standard_shape() {
        let s = TimestampFormat::Standard.format(&fixed());
        assert_eq!(s.len(), "2025/01/08 10:30:45".len());
        assert_eq!(&s[4..5], "/");
    }
}
