//! Sink trait for emission destinations

use super::{error::Result, level::Level};

/// Final destination of a rendered line.
///
/// Called for its side effect from the emission stage; a returned error
/// becomes that stage's error.
pub trait Sink: Send + Sync {
    fn write_line(&self, level: Level, line: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
