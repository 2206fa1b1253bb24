//! Request-scoped structured data
//!
//! A [`Context`] owns a [`Map`] of key/value data and a [`Logger`](crate::Logger)
//! whose first stage appends that data, as JSON, to every event. Contexts
//! travel between call layers inside an explicit [`Carrier`].

pub mod carrier;
pub mod context;
pub mod map;

pub use carrier::Carrier;
pub use context::{Context, ContextData, DataHandle};
pub use map::{update_map, Map};
