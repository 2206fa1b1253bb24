//! Process-wide logger
//!
//! [`global()`] hands out one lazily built [`GlobalLogger`]: level filter
//! seeded at [`Level::INFO`], level prefix, then a write to stderr. The
//! threshold is read on every dispatch, so [`GlobalLogger::set_level`] takes
//! effect on the next call.
//!
//! ```
//! use rust_logger_pipeline::{global, Level};
//!
//! global().info("information", vec![]);
//! global().set_level(Level::DEBUG);
//! assert_eq!(global().level(), Level::DEBUG);
//! # global().set_level(Level::INFO);
//! ```

use super::{
    level::Level,
    logger::Logger,
    proxy::Proxy,
    sink::Sink,
    value::Value,
};
use crate::sinks::ConsoleSink;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

static GLOBAL_LOGGER: OnceLock<GlobalLogger> = OnceLock::new();

/// The process-wide logger, built on first access
pub fn global() -> &'static GlobalLogger {
    GlobalLogger::get_or_init(&GLOBAL_LOGGER, GlobalLogger::with_default_pipeline)
}

/// A [`Logger`] with a threshold that can be changed at any time
#[derive(Debug)]
pub struct GlobalLogger {
    logger: Logger,
    threshold: Arc<RwLock<Level>>,
}

impl GlobalLogger {
    /// Build a logger writing to `sink`, seeded at [`Level::INFO`]
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        let threshold = Arc::new(RwLock::new(Level::INFO));
        let logger = Logger::builder()
            .shared_level(Arc::clone(&threshold))
            .sink(sink)
            .build();
        Self { logger, threshold }
    }

    pub fn with_default_pipeline() -> Self {
        Self::new(Arc::new(ConsoleSink::new()))
    }

    /// Return the instance in `cell`, running `init` exactly once across
    /// all concurrent first callers. Other callers block until it finishes.
    pub fn get_or_init<F>(cell: &OnceLock<GlobalLogger>, init: F) -> &GlobalLogger
    where
        F: FnOnce() -> GlobalLogger,
    {
        cell.get_or_init(init)
    }

    pub fn level(&self) -> Level {
        *self.threshold.read()
    }

    pub fn set_level(&self, level: Level) {
        *self.threshold.write() = level;
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn proxy(&self) -> &Arc<Proxy> {
        self.logger.proxy()
    }

    pub fn log(&self, level: Level, format: impl Into<String>, args: Vec<Value>) {
        self.logger.log(level, format, args);
    }

    pub fn error(&self, format: impl Into<String>, args: Vec<Value>) {
        self.logger.error(format, args);
    }

    pub fn warn(&self, format: impl Into<String>, args: Vec<Value>) {
        self.logger.warn(format, args);
    }

    pub fn info(&self, format: impl Into<String>, args: Vec<Value>) {
        self.logger.info(format, args);
    }

    pub fn debug(&self, format: impl Into<String>, args: Vec<Value>) {
        self.logger.debug(format, args);
    }

    pub fn trace(&self, format: impl Into<String>, args: Vec<Value>) {
        self.logger.trace(format, args);
    }
}
