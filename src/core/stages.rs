//! Ready-made stages: level filtering, prefixing, rendering and emission

use super::{
    error::Result,
    event::Event,
    level::Level,
    mapper::MapperFunc,
};
use crate::sinks::{ConsoleSink, Sink};
use parking_lot::RwLock;
use std::sync::Arc;

/// Keep events whose rank is `<= threshold`, drop the rest silently
pub fn level_filter(threshold: Level) -> MapperFunc {
    MapperFunc::new(move |ev| Ok(filter_by(ev, threshold)))
}

/// Like [`level_filter`] but reads the threshold on every call
pub fn shared_level_filter(threshold: Arc<RwLock<Level>>) -> MapperFunc {
    MapperFunc::new(move |ev| {
        let current = *threshold.read();
        Ok(filter_by(ev, current))
    })
}

fn filter_by(ev: Event, threshold: Level) -> Option<Event> {
    if ev.level() <= threshold {
        Some(ev)
    } else {
        None
    }
}

/// Prefix the template with the level marker, e.g. `"x=%d"` becomes `"E | x=%d"`
pub fn level_to_prefix_mapper(ev: Event) -> Result<Option<Event>> {
    let (level, format, args) = ev.into_parts();
    Ok(Some(Event::new(
        level,
        format!("{} {}", level.prefix(), format),
        args,
    )))
}

/// Replace the template by its rendered text and clear the arguments
pub fn render_mapper(ev: Event) -> Result<Option<Event>> {
    let text = ev.rendered().replace('%', "%%");
    Ok(Some(Event::new(ev.level(), text, Vec::new())))
}

/// Render the event and write it to `sink`
pub fn emit_to(sink: Arc<dyn Sink>) -> MapperFunc {
    MapperFunc::new(move |ev| {
        sink.write_line(ev.level(), &ev.rendered())?;
        Ok(Some(ev))
    })
}

/// Write events to stderr, one line each
pub fn standard_log_consumer() -> MapperFunc {
    emit_to(Arc::new(ConsoleSink::new()))
}
