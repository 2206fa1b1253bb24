//! Key/value map with merge and structured-event support

use crate::core::{Event, Value};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Merge `a` and `b` into a new map.
///
/// Keys from both sides survive; on collision the value from `b` wins.
/// Either side may be absent; two absent sides yield an empty map.
pub fn update_map<K, V>(a: Option<&Map<K, V>>, b: Option<&Map<K, V>>) -> Map<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    let mut merged = a.cloned().unwrap_or_default();
    if let Some(b) = b {
        for (k, v) in b.iter() {
            merged.inner.insert(k.clone(), v.clone());
        }
    }
    merged
}

/// Map with unique keys, iterated and serialized in key order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Map<K: Ord, V> {
    inner: BTreeMap<K, V>,
}

impl<K: Ord, V> Default for Map<K, V> {
    fn default() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V> Map<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the map for chaining
    pub fn set(&mut self, key: impl Into<K>, value: impl Into<V>) -> &mut Self {
        self.inner.insert(key.into(), value.into());
        self
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.get(key)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, V> {
        self.inner.iter()
    }
}

impl<K: Ord + Clone, V: Clone> Map<K, V> {
    /// A new map with `other` merged over this one
    #[must_use]
    pub fn update(&self, other: &Map<K, V>) -> Map<K, V> {
        update_map(Some(self), Some(other))
    }
}

impl<K: Ord + Serialize, V: Serialize> Map<K, V> {
    /// Append this map as JSON at the tail of the event.
    ///
    /// The template gains `" | %s"` and the JSON text becomes the last
    /// argument. If encoding fails the template gains `" | %v"` and the
    /// error text is appended instead.
    pub fn struct_event(&self, ev: Event) -> Event {
        let (level, format, mut args) = ev.into_parts();
        match serde_json::to_string(&self.inner) {
            Ok(json) => {
                args.push(Value::Str(json));
                Event::new(level, format + " | %s", args)
            }
            Err(e) => {
                args.push(Value::Str(e.to_string()));
                Event::new(level, format + " | %v", args)
            }
        }
    }
}

impl<K: Ord, V> From<BTreeMap<K, V>> for Map<K, V> {
    fn from(inner: BTreeMap<K, V>) -> Self {
        Self { inner }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord, V> IntoIterator for Map<K, V> {
    type Item = (K, V);
    type IntoIter = btree_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a Map<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = btree_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
