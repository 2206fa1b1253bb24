//! Logging macros.
//!
//! Templates use printf-style verbs (`%d`, `%s`, `%v`, ...) rendered by the
//! pipeline at emission time; arguments are converted to [`Value`](crate::Value).
//!
//! # Examples
//!
//! ```
//! use rust_logger_pipeline::prelude::*;
//! use rust_logger_pipeline::info;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = Logger::builder().sink(sink.clone()).build();
//!
//! info!(logger, "Server started");
//! info!(logger, "listening on port %d", 8080);
//! info!(logger, "user %s did %q", "alice", "login");
//!
//! assert_eq!(
//!     sink.lines(),
//!     vec![
//!         "I | Server started",
//!         "I | listening on port 8080",
//!         r#"I | user alice did "login""#,
//!     ]
//! );
//! ```

/// Build an argument list, converting each expression into a `Value`.
///
/// ```
/// use rust_logger_pipeline::{args, Value};
///
/// let args = args![1, "two", 3.5, true];
/// assert_eq!(args[1], Value::Str("two".to_string()));
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        <::std::vec::Vec<$crate::Value>>::from([$($crate::Value::from($arg)),*])
    };
}

/// Log at an explicit level.
///
/// ```
/// # use rust_logger_pipeline::prelude::*;
/// # let logger = Logger::builder().sink(std::sync::Arc::new(MemorySink::new())).build();
/// use rust_logger_pipeline::log;
/// log!(logger, Level::INFO, "Simple message");
/// log!(logger, Level::ERROR, "Error code: %d", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($level, $format, $crate::args![$($arg),*])
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::TRACE, $($rest)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::DEBUG, $($rest)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::INFO, $($rest)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use rust_logger_pipeline::prelude::*;
/// # let logger = Logger::builder().sink(std::sync::Arc::new(MemorySink::new())).build();
/// use rust_logger_pipeline::warn;
/// warn!(logger, "Retry attempt %d of %d", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::WARN, $($rest)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::ERROR, $($rest)+)
    };
}
