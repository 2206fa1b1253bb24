//! Core pipeline types and traits

pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod global;
pub mod level;
pub mod logger;
pub mod mapper;
pub mod mapper_list;
pub mod proxy;
pub mod sink;
pub mod stage;
pub mod stages;
pub mod timestamp;
pub mod value;

pub use config::{LoggerConfig, Target};
pub use error::{LoggerError, Result};
pub use event::Event;
pub use format::render;
pub use global::{global, GlobalLogger};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use mapper::{
    must_new_mapper_func, new_mapper_func, CanonicalFn, CheckFn, InspectFn, MapperFunc, Shape,
    TransformFn,
};
pub use mapper_list::MapperList;
pub use proxy::{ErrConsumer, Proxy};
pub use sink::Sink;
pub use stage::Stage;
pub use stages::{
    emit_to, level_filter, level_to_prefix_mapper, render_mapper, shared_level_filter,
    standard_log_consumer,
};
pub use timestamp::TimestampFormat;
pub use value::Value;
