//! Mapper normalization and composition
//!
//! A [`MapperFunc`] is the canonical stage shape `Event -> Result<Option<Event>>`.
//! Four callable shapes are accepted and normalized into it:
//!
//! | shape                         | canonical result                  |
//! |-------------------------------|-----------------------------------|
//! | `Fn(Event) -> Result<Option<Event>>` | passed through             |
//! | `Fn(&Event)`                  | the input event, no error         |
//! | `Fn(&Event) -> Result<()>`    | the input event, or the error     |
//! | `Fn(Event) -> Event`          | the returned event, no error      |
//!
//! The typed constructors ([`MapperFunc::new`], [`MapperFunc::inspect`],
//! [`MapperFunc::check`], [`MapperFunc::transform`]) and the [`Shape`] enum
//! catch unsupported shapes at compile time. [`new_mapper_func`] is the
//! runtime-checked fallback for values whose type is only known dynamically.
//!
//! # Composition
//!
//! ```
//! use rust_logger_pipeline::prelude::*;
//!
//! let upper = MapperFunc::transform(|ev: Event| {
//!     Event::new(ev.level(), ev.format().to_uppercase(), ev.args().to_vec())
//! });
//! let audit = MapperFunc::check(|_: &Event| Err(LoggerError::other("ignored")));
//!
//! // `via` branches off a side observer whose result is discarded
//! let chain = upper.via(audit);
//! let out = chain.call(Event::new(Level::INFO, "hi", vec![])).unwrap();
//! assert_eq!(out.unwrap().format(), "HI");
//! ```

use super::{
    error::{LoggerError, Result},
    event::Event,
    stage::Stage,
};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// Canonical stage signature
pub type CanonicalFn = dyn Fn(Event) -> Result<Option<Event>> + Send + Sync;
/// Side-effect only
pub type InspectFn = dyn Fn(&Event) + Send + Sync;
/// Reports an error or lets the event through unchanged
pub type CheckFn = dyn Fn(&Event) -> Result<()> + Send + Sync;
/// Pure event transformation
pub type TransformFn = dyn Fn(Event) -> Event + Send + Sync;

/// The closed set of recognized callable shapes
#[derive(Clone)]
pub enum Shape {
    Canonical(Arc<CanonicalFn>),
    Inspect(Arc<InspectFn>),
    Check(Arc<CheckFn>),
    Transform(Arc<TransformFn>),
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Canonical(_) => "Canonical",
            Shape::Inspect(_) => "Inspect",
            Shape::Check(_) => "Check",
            Shape::Transform(_) => "Transform",
        };
        write!(f, "Shape::{}", name)
    }
}

/// A normalized, composable stage. The default value is the unset mapper.
#[derive(Clone, Default)]
pub struct MapperFunc {
    inner: Option<Arc<CanonicalFn>>,
}

impl MapperFunc {
    /// The unset mapper. Calling it fails with [`LoggerError::NilMapperFunc`].
    #[must_use]
    pub fn nil() -> Self {
        Self { inner: None }
    }

    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Event) -> Result<Option<Event>> + Send + Sync + 'static,
    {
        Self {
            inner: Some(Arc::new(f)),
        }
    }

    pub fn inspect<F>(f: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        Self::new(move |ev| {
            f(&ev);
            Ok(Some(ev))
        })
    }

    pub fn check<F>(f: F) -> Self
    where
        F: Fn(&Event) -> Result<()> + Send + Sync + 'static,
    {
        Self::new(move |ev| {
            f(&ev)?;
            Ok(Some(ev))
        })
    }

    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(Event) -> Event + Send + Sync + 'static,
    {
        Self::new(move |ev| Ok(Some(f(ev))))
    }

    pub fn from_shape(shape: Shape) -> Self {
        match shape {
            Shape::Canonical(f) => Self { inner: Some(f) },
            Shape::Inspect(f) => Self::inspect(move |ev| f(ev)),
            Shape::Check(f) => Self::check(move |ev| f(ev)),
            Shape::Transform(f) => Self::transform(move |ev| f(ev)),
        }
    }

    pub fn is_nil(&self) -> bool {
        self.inner.is_none()
    }

    /// Invoke the mapper.
    ///
    /// A missing event fails with [`LoggerError::NilEvent`] and an unset
    /// mapper with [`LoggerError::NilMapperFunc`]; neither invokes the
    /// underlying callable.
    pub fn call(&self, event: impl Into<Option<Event>>) -> Result<Option<Event>> {
        let event = event.into().ok_or(LoggerError::NilEvent)?;
        let f = self.inner.as_ref().ok_or(LoggerError::NilMapperFunc)?;
        f(event)
    }

    /// Chain `f` after this mapper.
    ///
    /// `f` receives this mapper's output, which may be no event at all (in
    /// which case `f` reports [`LoggerError::NilEvent`]). An error from this
    /// mapper is returned without invoking `f`. An unset side is skipped.
    #[must_use]
    pub fn next(self, f: impl Into<MapperFunc>) -> MapperFunc {
        let other = f.into();
        match (self.inner, other.inner) {
            (None, inner) | (inner, None) => MapperFunc { inner },
            (Some(first), Some(second)) => {
                let first = MapperFunc { inner: Some(first) };
                let second = MapperFunc { inner: Some(second) };
                MapperFunc::new(move |ev| {
                    let ev = first.call(ev)?;
                    second.call(ev)
                })
            }
        }
    }

    /// Attach `f` as a side observer.
    ///
    /// `f` sees this mapper's output but its result and error are discarded;
    /// the composed mapper always yields this mapper's output.
    #[must_use]
    pub fn via(self, f: impl Into<MapperFunc>) -> MapperFunc {
        let other = f.into();
        match (self.inner, other.inner) {
            (None, inner) | (inner, None) => MapperFunc { inner },
            (Some(first), Some(side)) => {
                let first = MapperFunc { inner: Some(first) };
                let side = MapperFunc { inner: Some(side) };
                MapperFunc::new(move |ev| {
                    let ev = first.call(ev)?;
                    let _ = side.call(ev.clone());
                    Ok(ev)
                })
            }
        }
    }
}

impl fmt::Debug for MapperFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            f.write_str("MapperFunc(nil)")
        } else {
            f.write_str("MapperFunc(..)")
        }
    }
}

impl From<Shape> for MapperFunc {
    fn from(shape: Shape) -> Self {
        MapperFunc::from_shape(shape)
    }
}

impl From<Arc<CanonicalFn>> for MapperFunc {
    fn from(f: Arc<CanonicalFn>) -> Self {
        MapperFunc { inner: Some(f) }
    }
}

impl From<fn(Event) -> Result<Option<Event>>> for MapperFunc {
    fn from(f: fn(Event) -> Result<Option<Event>>) -> Self {
        MapperFunc::new(f)
    }
}

impl Stage for MapperFunc {
    fn map(&self, event: Event) -> Result<Option<Event>> {
        self.call(event)
    }

    fn name(&self) -> &str {
        "mapper"
    }
}

/// Normalize a value whose callable shape is only known at runtime.
///
/// Recognized: [`MapperFunc`], [`Shape`], the `Arc`-wrapped shape aliases and
/// the plain function pointers `fn(Event) -> Result<Option<Event>>`,
/// `fn(&Event)`, `fn(&Event) -> Result<()>` and `fn(Event) -> Event`.
/// Anything else fails with [`LoggerError::InvalidMapperFunc`].
pub fn new_mapper_func<F: Any>(f: F) -> Result<MapperFunc> {
    let any: Box<dyn Any> = Box::new(f);

    let any = match any.downcast::<MapperFunc>() {
        Ok(m) => return Ok(*m),
        Err(any) => any,
    };
    let any = match any.downcast::<Shape>() {
        Ok(s) => return Ok(MapperFunc::from_shape(*s)),
        Err(any) => any,
    };
    let any = match any.downcast::<Arc<CanonicalFn>>() {
        Ok(f) => return Ok(MapperFunc::from_shape(Shape::Canonical(*f))),
        Err(any) => any,
    };
    let any = match any.downcast::<Arc<InspectFn>>() {
        Ok(f) => return Ok(MapperFunc::from_shape(Shape::Inspect(*f))),
        Err(any) => any,
    };
    let any = match any.downcast::<Arc<CheckFn>>() {
        Ok(f) => return Ok(MapperFunc::from_shape(Shape::Check(*f))),
        Err(any) => any,
    };
    let any = match any.downcast::<Arc<TransformFn>>() {
        Ok(f) => return Ok(MapperFunc::from_shape(Shape::Transform(*f))),
        Err(any) => any,
    };
    let any = match any.downcast::<fn(Event) -> Result<Option<Event>>>() {
        Ok(f) => return Ok(MapperFunc::new(*f)),
        Err(any) => any,
    };
    let any = match any.downcast::<fn(&Event)>() {
        Ok(f) => return Ok(MapperFunc::inspect(*f)),
        Err(any) => any,
    };
    let any = match any.downcast::<fn(&Event) -> Result<()>>() {
        Ok(f) => return Ok(MapperFunc::check(*f)),
        Err(any) => any,
    };
    match any.downcast::<fn(Event) -> Event>() {
        Ok(f) => Ok(MapperFunc::transform(*f)),
        Err(_) => Err(LoggerError::invalid_mapper(type_name::<F>())),
    }
}

/// Like [`new_mapper_func`] but panics on an unrecognized shape.
///
/// Meant for fixed wiring at startup, where a wrong shape is a bug.
pub fn must_new_mapper_func<F: Any>(f: F) -> MapperFunc {
    match new_mapper_func(f) {
        Ok(m) => m,
        Err(e) => panic!("{}", e),
    }
}
