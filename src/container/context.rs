//! Logger bound to a mutable map of request data
//!
//! ```
//! use rust_logger_pipeline::container::{Carrier, Context, ContextData};
//! use rust_logger_pipeline::core::{emit_to, level_to_prefix_mapper};
//! use rust_logger_pipeline::prelude::*;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let tail = MapperFunc::new(level_to_prefix_mapper).next(emit_to(sink.clone()));
//!
//! let mut data = ContextData::new();
//! data.set("RequestID", "stone1");
//! let ctx = Arc::new(Context::new(data, tail));
//!
//! let carrier = ctx.with_carrier(&Carrier::new());
//! let found = Context::from_carrier(&carrier).unwrap();
//! found.data().set("Path", "/index");
//! found.logger().info("hit", args![]);
//!
//! assert_eq!(
//!     sink.lines(),
//!     vec![r#"I | hit | {"Path":"/index","RequestID":"stone1"}"#.to_string()]
//! );
//! ```

use super::{carrier::Carrier, map::Map};
use crate::core::{
    level_to_prefix_mapper, standard_log_consumer, LoggerError, Logger, MapperFunc, Proxy,
    Result,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Request data carried by a [`Context`]
pub type ContextData = Map<String, serde_json::Value>;

/// A key/value map plus a logger that appends the map's current contents
/// to every event it logs.
///
/// The logger reads the data at log time, so entries set after the context
/// was built still show up. Cloning a context copies the data; the copy and
/// the original evolve independently.
pub struct Context {
    data: Arc<RwLock<ContextData>>,
    logger: Logger,
    tail: MapperFunc,
}

impl Context {
    /// Take ownership of `data`; events are decorated with it, then passed to `tail`
    pub fn new(data: ContextData, tail: MapperFunc) -> Self {
        let data = Arc::new(RwLock::new(data));
        let live = Arc::clone(&data);
        let decorate = MapperFunc::transform(move |ev| live.read().struct_event(ev));
        let pipeline = decorate.next(tail.clone());
        let logger = Logger::new(Proxy::new(vec![Arc::new(pipeline)]));
        Self { data, logger, tail }
    }

    /// Decorate, prefix with the level, then write to stderr
    pub fn with_default_pipeline(data: ContextData) -> Self {
        let tail = MapperFunc::new(level_to_prefix_mapper).next(standard_log_consumer());
        Self::new(data, tail)
    }

    /// Handle to the live data. Each call on it locks only for that call,
    /// so the handle may stay alive across logging calls.
    pub fn data(&self) -> DataHandle {
        DataHandle {
            data: Arc::clone(&self.data),
        }
    }

    /// A copy of the current data
    pub fn snapshot(&self) -> ContextData {
        self.data.read().clone()
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// A carrier holding this context
    #[must_use]
    pub fn with_carrier(self: &Arc<Self>, carrier: &Carrier) -> Carrier {
        carrier.with_value(Arc::clone(self))
    }

    /// The context stored in `carrier`
    pub fn from_carrier(carrier: &Carrier) -> Result<Arc<Context>> {
        carrier
            .value::<Context>()
            .ok_or(LoggerError::ContextNotFound)
    }
}

/// Live view of a context's data
#[derive(Clone)]
pub struct DataHandle {
    data: Arc<RwLock<ContextData>>,
}

impl DataHandle {
    /// Insert or replace; returns the handle for chaining
    pub fn set(&self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> &Self {
        self.data.write().set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.data.read().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<serde_json::Value> {
        self.data.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl fmt::Debug for DataHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DataHandle").field(&*self.data.read()).finish()
    }
}

impl Clone for Context {
    fn clone(&self) -> Self {
        Context::new(self.snapshot(), self.tail.clone())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("data", &*self.data.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emit_to;
    use crate::sinks::MemorySink;
    use serde_json::json;

    fn memory_context(data: ContextData) -> (Arc<Context>, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let tail = MapperFunc::new(level_to_prefix_mapper).next(emit_to(sink.clone()));
        (Arc::new(Context::new(data, tail)), sink)
    }

    #[test]
    fn test_request_flow() {
        let mut data = ContextData::new();
        data.set("RequestID", "stone1");
        let (ctx, sink) = memory_context(data);
        let carrier = ctx.with_carrier(&Carrier::new());

        let found = Context::from_carrier(&carrier).unwrap();
        found.logger().info("first", vec![]);
        found.data().set("User", "alice");
        found.logger().warn("second %d", vec![2.into()]);

        assert_eq!(
            sink.lines(),
            vec![
                r#"I | first | {"RequestID":"stone1"}"#,
                r#"W | second 2 | {"RequestID":"stone1","User":"alice"}"#,
            ]
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let (ctx, sink) = memory_context(ContextData::new());
        let copy = (*ctx).clone();

        ctx.data().set("a", 1);
        copy.data().set("b", json!([1, 2]));
        ctx.logger().info("orig", vec![]);
        copy.logger().info("copy", vec![]);

        assert_eq!(
            sink.lines(),
            vec![r#"I | orig | {"a":1}"#, r#"I | copy | {"b":[1,2]}"#]
        );
        assert_eq!(ctx.snapshot().get("b"), None);
    }

    #[test]
    fn test_logging_while_data_handle_alive() {
        let mut data = ContextData::new();
        data.set("RequestID", "r1");
        let (ctx, sink) = memory_context(data);

        let (tx, rx) = std::sync::mpsc::channel();
        let worker = Arc::clone(&ctx);
        std::thread::spawn(move || {
            let handle = worker.data();
            handle.set("Path", "/a");
            worker.logger().info("hit", vec![]);
            let copy = (*worker).clone();
            handle.set("Verb", "GET");
            copy.logger().info("copy", vec![]);
            assert_eq!(handle.get("Verb"), Some(json!("GET")));
            let _ = tx.send(());
        });

        rx.recv_timeout(std::time::Duration::from_secs(3))
            .expect("logging blocked while a data handle was held");
        assert_eq!(
            sink.lines(),
            vec![
                r#"I | hit | {"Path":"/a","RequestID":"r1"}"#,
                r#"I | copy | {"Path":"/a","RequestID":"r1"}"#,
            ]
        );
    }

    #[test]
    fn test_data_handle_remove() {
        let (ctx, _sink) = memory_context(ContextData::new());
        let data = ctx.data();
        data.set("a", 1).set("b", 2);
        assert_eq!(data.remove("a"), Some(json!(1)));
        assert_eq!(data.len(), 1);
        assert_eq!(ctx.snapshot().get("b"), Some(&json!(2)));
    }

    #[test]
    fn test_default_pipeline_shape() {
        let ctx = Context::with_default_pipeline(ContextData::new());
        assert_eq!(ctx.logger().proxy().len(), 1);
        assert!(ctx.snapshot().is_empty());
    }

    #[test]
    fn test_missing_context_is_recoverable() {
        let err = Context::from_carrier(&Carrier::new()).unwrap_err();
        assert!(matches!(err, LoggerError::ContextNotFound));
    }

    #[test]
    fn test_from_carrier_returns_same_instance() {
        let (ctx, _sink) = memory_context(ContextData::new());
        let carrier = ctx.with_carrier(&Carrier::new());
        let found = Context::from_carrier(&carrier).unwrap();
        assert!(Arc::ptr_eq(&ctx, &found));
    }
}
