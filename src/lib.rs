//! # Rust Logger Pipeline
//!
//! Structured logging built from composable stages.
//!
//! An [`Event`] (level, printf-style template, arguments) is submitted to a
//! [`Proxy`], which runs it through an ordered list of stages. Each stage
//! may pass the event on, transform it, drop it, or fail; failures go to an
//! error consumer and never reach the logging call.
//!
//! ## Features
//!
//! - **Mapper composition**: chain stages with [`MapperFunc::next`], branch
//!   side observers with [`MapperFunc::via`]
//! - **Standard pipeline**: level filter, level prefix, then emission
//! - **Process-wide logger**: [`global()`] with a runtime-adjustable level
//! - **Request context**: [`container::Context`] appends request data as JSON
//!
//! ```
//! use rust_logger_pipeline::prelude::*;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = Logger::builder().level(Level::INFO).sink(sink.clone()).build();
//! logger.error("x=%d", args![5]);
//! logger.debug("x=%d", args![5]);
//! assert_eq!(sink.lines(), vec!["E | x=5".to_string()]);
//! ```

pub mod container;
pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::args;
    pub use crate::container::{Carrier, Context, ContextData, Map};
    pub use crate::core::{
        global, Event, GlobalLogger, Level, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        MapperFunc, MapperList, Proxy, Result, Sink, Stage, TimestampFormat, Value,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};
}

pub use core::{
    global, Event, GlobalLogger, Level, Logger, LoggerBuilder, LoggerError, MapperFunc, Proxy,
    Result, TimestampFormat, Value,
};
pub use sinks::{ConsoleSink, FileSink, MemorySink};
