//! Stage trait for entries of a dispatch chain

use super::{error::Result, event::Event};

/// One entry of a [`Proxy`](super::Proxy) chain.
///
/// `Ok(Some(ev))` passes `ev` on, `Ok(None)` drops the event silently and
/// `Err(_)` stops dispatch and reports the error.
pub trait Stage: Send + Sync {
    fn map(&self, event: Event) -> Result<Option<Event>>;

    fn name(&self) -> &str {
        "stage"
    }
}
