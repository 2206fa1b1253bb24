//! In-memory sink, handy for tests and demos

use crate::core::{Level, Result, Sink};
use parking_lot::Mutex;

/// Captures every line it receives
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().iter().map(|(_, l)| l.clone()).collect()
    }

    /// Captured lines with the level of the event that produced them
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.lines.lock().clone()
    }

    /// Remove and return the captured lines
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
            .into_iter()
            .map(|(_, l)| l)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl Sink for MemorySink {
    fn write_line(&self, level: Level, line: &str) -> Result<()> {
        self.lines.lock().push((level, line.to_string()));
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
