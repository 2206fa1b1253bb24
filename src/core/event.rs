//! Event structure

use super::format::render;
use super::level::Level;
use super::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable unit of log data: a level, a template and its arguments
///
/// Stages never edit an event in place; they build a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    level: Level,
    format: String,
    args: Vec<Value>,
}

impl Event {
    pub fn new(level: Level, format: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            level,
            format: format.into(),
            args,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Take the parts back out of the event
    pub fn into_parts(self) -> (Level, String, Vec<Value>) {
        (self.level, self.format, self.args)
    }

    /// The template with its arguments substituted
    pub fn rendered(&self) -> String {
        render(&self.format, &self.args)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let ev = Event::new(Level::WARN, "log %s", vec![Value::from("val")]);
        assert_eq!(ev.level(), Level::WARN);
        assert_eq!(ev.format(), "log %s");
        assert_eq!(ev.args(), &[Value::from("val")]);
        assert_eq!(ev.to_string(), "log val");
    }

    #[test]
    fn test_into_parts() {
        let (level, format, args) = Event::new(Level::INFO, "x=%d", vec![Value::from(5)]).into_parts();
        assert_eq!(level, Level::INFO);
        assert_eq!(format, "x=%d");
        assert_eq!(args, vec![Value::Int(5)]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let ev = Event::new(
            Level::DEBUG,
            "%c %v %v",
            vec![Value::from('k'), Value::Null, Value::from(b"ab".to_vec())],
        );
        let json = serde_json::to_string(&ev).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
        assert_eq!(back.rendered(), ev.rendered());
    }
}
