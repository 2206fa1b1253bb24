//! Immutable, type-keyed value bag for passing request state down a call chain

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Holds at most one value per type. Adding a value returns a new carrier
/// and leaves the original untouched, so a carrier can be cloned and handed
/// to other threads freely.
#[derive(Clone, Default)]
pub struct Carrier {
    values: Arc<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Carrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A carrier with `value` stored under its type, replacing any previous one
    #[must_use]
    pub fn with_value<T: Any + Send + Sync>(&self, value: Arc<T>) -> Carrier {
        let mut values = (*self.values).clone();
        values.insert(TypeId::of::<T>(), value);
        Carrier {
            values: Arc::new(values),
        }
    }

    pub fn value<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.values
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|v| v.downcast::<T>().ok())
    }

    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carrier")
            .field("values", &self.values.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct RequestId(String);

    #[test]
    fn test_with_value_leaves_parent_untouched() {
        let root = Carrier::new();
        let child = root.with_value(Arc::new(RequestId("r1".into())));

        assert!(root.value::<RequestId>().is_none());
        assert_eq!(*child.value::<RequestId>().unwrap(), RequestId("r1".into()));
        assert!(child.contains::<RequestId>());
        assert_eq!(child.len(), 1);
    }

    #[test]
    fn test_one_value_per_type() {
        let c = Carrier::new()
            .with_value(Arc::new(1u32))
            .with_value(Arc::new(2u32))
            .with_value(Arc::new("s"));

        assert_eq!(c.len(), 2);
        assert_eq!(*c.value::<u32>().unwrap(), 2);
        assert!(c.value::<u64>().is_none());
    }
}
