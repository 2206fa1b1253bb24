//! Logger façade and builder

use super::{
    error::LoggerError,
    event::Event,
    level::Level,
    mapper::MapperFunc,
    mapper_list::MapperList,
    proxy::{ErrConsumer, Proxy},
    sink::Sink,
    stage::Stage,
    stages::{emit_to, level_filter, level_to_prefix_mapper, shared_level_filter},
    value::Value,
};
use crate::sinks::ConsoleSink;
use parking_lot::RwLock;
use std::sync::Arc;

/// One call per severity level, each submitting an [`Event`] to a [`Proxy`].
///
/// Logging calls never fail; stage errors only reach the proxy's error
/// consumer. Cloning a `Logger` shares its proxy.
#[derive(Debug, Clone)]
pub struct Logger {
    proxy: Arc<Proxy>,
}

impl Logger {
    #[must_use]
    pub fn new(proxy: Proxy) -> Self {
        Self {
            proxy: Arc::new(proxy),
        }
    }

    #[must_use]
    pub fn from_shared(proxy: Arc<Proxy>) -> Self {
        Self { proxy }
    }

    /// A logger dispatching through `stages` in order
    #[must_use]
    pub fn with_stages(stages: Vec<Arc<dyn Stage>>) -> Self {
        Self::new(Proxy::new(stages))
    }

    /// Level filter and prefix, then a write to stderr
    #[must_use]
    pub fn default_pipeline(level: Level) -> Self {
        Self::builder().level(level).build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn proxy(&self) -> &Arc<Proxy> {
        &self.proxy
    }

    pub fn set_err_consumer<F>(&self, consumer: F)
    where
        F: Fn(LoggerError) + Send + Sync + 'static,
    {
        self.proxy.set_err_consumer(consumer);
    }

    pub fn log(&self, level: Level, format: impl Into<String>, args: Vec<Value>) {
        self.proxy.put(Event::new(level, format, args));
    }

    #[inline]
    pub fn error(&self, format: impl Into<String>, args: Vec<Value>) {
        self.log(Level::ERROR, format, args);
    }

    #[inline]
    pub fn warn(&self, format: impl Into<String>, args: Vec<Value>) {
        self.log(Level::WARN, format, args);
    }

    #[inline]
    pub fn info(&self, format: impl Into<String>, args: Vec<Value>) {
        self.log(Level::INFO, format, args);
    }

    #[inline]
    pub fn debug(&self, format: impl Into<String>, args: Vec<Value>) {
        self.log(Level::DEBUG, format, args);
    }

    #[inline]
    pub fn trace(&self, format: impl Into<String>, args: Vec<Value>) {
        self.log(Level::TRACE, format, args);
    }
}

/// Builder for the standard pipeline
///
/// The built proxy has two stages: a [`MapperList`] with the level filter,
/// the optional prefix and any extra mappers, then a [`MapperList`] writing
/// to every sink.
///
/// # Example
/// ```
/// use rust_logger_pipeline::prelude::*;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::builder()
///     .level(Level::WARN)
///     .sink(sink.clone())
///     .build();
///
/// logger.error("x=%d", args![5]);
/// logger.info("hidden", args![]);
/// assert_eq!(sink.lines(), vec!["E | x=5".to_string()]);
/// ```
pub struct LoggerBuilder {
    level: Level,
    threshold: Option<Arc<RwLock<Level>>>,
    prefix: bool,
    mappers: Vec<MapperFunc>,
    sinks: Vec<Arc<dyn Sink>>,
    err_consumer: Option<ErrConsumer>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: Level::INFO,
            threshold: None,
            prefix: true,
            mappers: Vec::new(),
            sinks: Vec::new(),
            err_consumer: None,
        }
    }

    /// Set a fixed threshold level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Filter against a threshold that can change after the logger is built
    #[must_use = "builder methods return a new value"]
    pub fn shared_level(mut self, threshold: Arc<RwLock<Level>>) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Toggle the level prefix annotation (on by default)
    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, enabled: bool) -> Self {
        self.prefix = enabled;
        self
    }

    /// Add a mapper run after the prefix and before emission
    #[must_use = "builder methods return a new value"]
    pub fn mapper(mut self, mapper: impl Into<MapperFunc>) -> Self {
        self.mappers.push(mapper.into());
        self
    }

    /// Add a sink. Without any sink, lines go to stderr.
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn err_consumer(mut self, consumer: ErrConsumer) -> Self {
        self.err_consumer = Some(consumer);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let filter = match self.threshold {
            Some(threshold) => shared_level_filter(threshold),
            None => level_filter(self.level),
        };

        let annotate = MapperList::new(vec![filter]);
        if self.prefix {
            annotate.append(MapperFunc::new(level_to_prefix_mapper));
        }
        for mapper in self.mappers {
            annotate.append(mapper);
        }

        let sinks = if self.sinks.is_empty() {
            vec![Arc::new(ConsoleSink::new()) as Arc<dyn Sink>]
        } else {
            self.sinks
        };
        let emit = MapperList::new(sinks.into_iter().map(emit_to).collect());

        let proxy = Proxy::new(vec![Arc::new(annotate), Arc::new(emit)]);
        if let Some(consumer) = self.err_consumer {
            proxy.set_err_consumer(move |e| consumer(e));
        }
        Logger::new(proxy)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
