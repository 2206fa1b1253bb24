//! Serializable logger configuration
//!
//! ```
//! use rust_logger_pipeline::core::LoggerConfig;
//! use rust_logger_pipeline::Level;
//!
//! let config = LoggerConfig::from_json(r#"{"level": "debug", "target": "stdout"}"#).unwrap();
//! assert_eq!(config.level, Level::DEBUG);
//! let logger = config.into_builder().unwrap().build();
//! # let _ = logger;
//! ```

use super::{
    error::{LoggerError, Result},
    level::Level,
    logger::LoggerBuilder,
    timestamp::TimestampFormat,
};
use crate::sinks::{ConsoleSink, ConsoleTarget, FileSink};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Where the standard pipeline writes lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Stderr,
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Level name (`"warn"`) or rank (`20`)
    #[serde(deserialize_with = "level_name_or_rank")]
    pub level: Level,
    pub prefix: bool,
    pub target: Target,
    pub timestamp: Option<TimestampFormat>,
    pub colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            prefix: true,
            target: Target::Stderr,
            timestamp: Some(TimestampFormat::Standard),
            colors: false,
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// A builder preconfigured from this record
    pub fn into_builder(self) -> Result<LoggerBuilder> {
        LoggerBuilder::from_config(self)
    }
}

impl LoggerBuilder {
    /// Start from a [`LoggerConfig`]; fails if a file target cannot be opened
    pub fn from_config(config: LoggerConfig) -> Result<Self> {
        let builder = LoggerBuilder::new().level(config.level).prefix(config.prefix);
        let builder = match config.target {
            console @ (Target::Stderr | Target::Stdout) => {
                let target = match console {
                    Target::Stdout => ConsoleTarget::Stdout,
                    _ => ConsoleTarget::Stderr,
                };
                let sink = ConsoleSink::plain(target)
                    .with_timestamp(config.timestamp)
                    .with_colors(config.colors);
                builder.sink(Arc::new(sink))
            }
            Target::File(path) => {
                if path.as_os_str().is_empty() {
                    return Err(LoggerError::config("LoggerConfig", "empty file path"));
                }
                let sink = FileSink::new(path)?.with_timestamp(config.timestamp);
                builder.sink(Arc::new(sink))
            }
        };
        Ok(builder)
    }
}

fn level_name_or_rank<'de, D>(deserializer: D) -> std::result::Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Rank(i32),
        Name(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Rank(rank) => Ok(Level::new(rank)),
        Repr::Name(name) => name.parse().map_err(serde::de::Error::custom),
    }
}
