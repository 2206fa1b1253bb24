//! Log level definitions
//!
//! A [`Level`] is a verbosity rank: lower ranks are more severe. A level
//! filter with threshold `T` keeps every event whose rank is `<= T`, so
//! [`Level::SILENT`] drops everything and [`Level::TRACE`] keeps everything.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(i32);

impl Level {
    pub const SILENT: Level = Level(0);
    pub const ERROR: Level = Level(10);
    pub const WARN: Level = Level(20);
    pub const INFO: Level = Level(30);
    pub const DEBUG: Level = Level(40);
    pub const TRACE: Level = Level(50);

    /// All named ranks, most severe first
    pub const ALL: [Level; 6] = [
        Level::SILENT,
        Level::ERROR,
        Level::WARN,
        Level::INFO,
        Level::DEBUG,
        Level::TRACE,
    ];

    #[must_use]
    pub const fn new(rank: i32) -> Self {
        Level(rank)
    }

    #[must_use]
    pub const fn rank(self) -> i32 {
        self.0
    }

    pub fn to_str(&self) -> &'static str {
        match *self {
            Level::SILENT => "SILENT",
            Level::ERROR => "ERROR",
            Level::WARN => "WARN",
            Level::INFO => "INFO",
            Level::DEBUG => "DEBUG",
            Level::TRACE => "TRACE",
            _ => "?",
        }
    }

    /// Line prefix used by the prefix annotation stage
    pub fn prefix(&self) -> &'static str {
        match *self {
            Level::INFO => "I |",
            Level::WARN => "W |",
            Level::ERROR => "E |",
            Level::DEBUG => "D |",
            Level::TRACE => "T |",
            _ => "? |",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match *self {
            Level::ERROR => Red,
            Level::WARN => Yellow,
            Level::INFO => Green,
            Level::DEBUG => Blue,
            Level::TRACE => BrightBlack,
            _ => White,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl From<i32> for Level {
    fn from(rank: i32) -> Self {
        Level(rank)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_str() {
            "?" => write!(f, "{}", self.0),
            name => f.write_str(name),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SILENT" => Ok(Level::SILENT),
            "ERROR" => Ok(Level::ERROR),
            "WARN" | "WARNING" => Ok(Level::WARN),
            "INFO" => Ok(Level::INFO),
            "DEBUG" => Ok(Level::DEBUG),
            "TRACE" => Ok(Level::TRACE),
            other => other
                .parse::<i32>()
                .map(Level)
                .map_err(|_| format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_verbosity() {
        assert!(Level::SILENT < Level::ERROR);
        assert!(Level::ERROR < Level::WARN);
        assert!(Level::WARN < Level::INFO);
        assert!(Level::INFO < Level::DEBUG);
        assert!(Level::DEBUG < Level::TRACE);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(Level::ERROR.prefix(), "E |");
        assert_eq!(Level::WARN.prefix(), "W |");
        assert_eq!(Level::INFO.prefix(), "I |");
        assert_eq!(Level::DEBUG.prefix(), "D |");
        assert_eq!(Level::TRACE.prefix(), "T |");
        assert_eq!(Level::SILENT.prefix(), "? |");
        assert_eq!(Level::new(11).prefix(), "? |");
    }

    #[test]
    fn test_parse() {
        assert_eq!("info".parse::<Level>(), Ok(Level::INFO));
        assert_eq!("Warning".parse::<Level>(), Ok(Level::WARN));
        assert_eq!(" trace ".parse::<Level>(), Ok(Level::TRACE));
        assert_eq!("42".parse::<Level>(), Ok(Level::new(42)));
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Level::DEBUG.to_string(), "DEBUG");
        assert_eq!(Level::new(12).to_string(), "12");
    }

    #[test]
    fn test_serde_is_rank() {
        assert_eq!(serde_json::to_string(&Level::WARN).unwrap(), "20");
        let level: Level = serde_json::from_str("40").unwrap();
        assert_eq!(level, Level::DEBUG);
    }
}
