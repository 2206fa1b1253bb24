//! Console sink implementation

use crate::core::{Level, Result, Sink, TimestampFormat};
#[cfg(feature = "console")]
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Standard stream a [`ConsoleSink`] writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    #[default]
    Stderr,
    Stdout,
}

/// Writes each line to stderr (or stdout), optionally timestamped and colored
pub struct ConsoleSink {
    target: ConsoleTarget,
    timestamp_format: Option<TimestampFormat>,
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            target: ConsoleTarget::Stderr,
            timestamp_format: Some(TimestampFormat::Standard),
            use_colors: false,
        }
    }

    /// A sink with no timestamp and no colors writing to `target`
    pub fn plain(target: ConsoleTarget) -> Self {
        Self {
            target,
            timestamp_format: None,
            use_colors: false,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: ConsoleTarget) -> Self {
        self.target = target;
        self
    }

    /// Set or clear the timestamp prefix
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_logger_pipeline::sinks::ConsoleSink;
    /// use rust_logger_pipeline::TimestampFormat;
    ///
    /// let sink = ConsoleSink::new().with_timestamp(Some(TimestampFormat::Iso8601));
    /// ```
    #[must_use]
    pub fn with_timestamp(mut self, format: Option<TimestampFormat>) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Color lines by level. Ignored without the `console` feature.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn decorate(&self, level: Level, line: &str) -> String {
        let line = match &self.timestamp_format {
            Some(ts) => format!("{} {}", ts.format_now(), line),
            None => line.to_string(),
        };

        #[cfg(feature = "console")]
        if self.use_colors {
            return line.color(level.color_code()).to_string();
        }
        let _ = level;
        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write_line(&self, level: Level, line: &str) -> Result<()> {
        let output = self.decorate(level, line);
        match self.target {
            ConsoleTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", output)?,
            ConsoleTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", output)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stderr => std::io::stderr().flush()?,
            ConsoleTarget::Stdout => std::io::stdout().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
