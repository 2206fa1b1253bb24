//! Ordered, appendable list of mappers usable as a single stage

use super::{
    error::{LoggerError, Result},
    event::Event,
    mapper::MapperFunc,
    stage::Stage,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// A set of event conversions applied from the top of the list.
///
/// Mapping stops silently when a mapper drops the event and stops with an
/// error, wrapped with the mapper's index, when a mapper fails. Appends are
/// copy-on-write so an in-flight [`map`](Stage::map) keeps the list it
/// started with.
#[derive(Default)]
pub struct MapperList {
    mappers: RwLock<Arc<Vec<MapperFunc>>>,
}

impl MapperList {
    pub fn new(mappers: Vec<MapperFunc>) -> Self {
        Self {
            mappers: RwLock::new(Arc::new(mappers)),
        }
    }

    pub fn append(&self, mapper: impl Into<MapperFunc>) {
        let mapper = mapper.into();
        let mut guard = self.mappers.write();
        Arc::make_mut(&mut *guard).push(mapper);
    }

    pub fn len(&self) -> usize {
        self.mappers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.read().is_empty()
    }

    fn snapshot(&self) -> Arc<Vec<MapperFunc>> {
        Arc::clone(&*self.mappers.read())
    }
}

impl Stage for MapperList {
    fn map(&self, event: Event) -> Result<Option<Event>> {
        let mut current = event;
        for (idx, mapper) in self.snapshot().iter().enumerate() {
            let input = current.clone();
            match mapper.call(current) {
                Ok(Some(next)) => current = next,
                Ok(None) => return Ok(None),
                Err(e) => return Err(LoggerError::stage(idx, input.rendered(), e)),
            }
        }
        Ok(Some(current))
    }

    fn name(&self) -> &str {
        "mapper_list"
    }
}

impl From<Vec<MapperFunc>> for MapperList {
    fn from(mappers: Vec<MapperFunc>) -> Self {
        MapperList::new(mappers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Level, Value};

    fn ev1() -> Event {
        Event::new(Level::INFO, "log %s", vec![Value::from("val")])
    }

    #[test]
    fn test_identity_without_mapping() {
        let ml = MapperList::default();
        assert_eq!(ml.map(ev1()).unwrap(), Some(ev1()));
    }

    #[test]
    fn test_identity_with_identity_mapper() {
        let ml = MapperList::default();
        ml.append(MapperFunc::new(|ev| Ok(Some(ev))));
        assert_eq!(ml.map(ev1()).unwrap(), Some(ev1()));
        assert_eq!(ml.len(), 1);
    }

    #[test]
    fn test_modify_two_times() {
        let ml = MapperList::default();
        ml.append(MapperFunc::transform(|ev: Event| {
            Event::new(Level::WARN, ev.format(), ev.args().to_vec())
        }));
        ml.append(MapperFunc::transform(|ev: Event| {
            Event::new(ev.level(), "log event %s", ev.args().to_vec())
        }));

        let got = ml.map(ev1()).unwrap().unwrap();
        assert_eq!(got.level(), Level::WARN);
        assert_eq!(got.to_string(), "log event val");
    }

    #[test]
    fn test_cancel_by_error() {
        let ml = MapperList::new(vec![
            MapperFunc::transform(|ev| ev),
            MapperFunc::new(|_| Err(LoggerError::other("canceled"))),
            MapperFunc::inspect(|_| panic!("must not run")),
        ]);

        let err = ml.map(ev1()).unwrap_err();
        assert_eq!(err.stage_path(), vec![1]);
        assert_eq!(err.root_cause().to_string(), "canceled");
        assert_eq!(err.to_string(), "Map error idx 1 ev log val: canceled");
    }

    #[test]
    fn test_stops_on_drop() {
        let ml = MapperList::new(vec![
            MapperFunc::new(|_| Ok(None)),
            MapperFunc::inspect(|_| panic!("must not run")),
        ]);
        assert_eq!(ml.map(ev1()).unwrap(), None);
    }

    #[test]
    fn test_successful_map_does_not_render() {
        let calls = || crate::core::format::RENDER_CALLS.with(|c| c.get());
        let ml = MapperList::new(vec![
            MapperFunc::transform(|ev| ev),
            MapperFunc::transform(|ev| ev),
        ]);
        let before = calls();
        assert_eq!(ml.map(ev1()).unwrap(), Some(ev1()));
        assert_eq!(calls(), before);
    }
}
