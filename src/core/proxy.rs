//! Pipeline dispatcher

use super::{
    error::{LoggerError, Result},
    event::Event,
    stage::Stage,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Receives errors raised while dispatching an event
pub type ErrConsumer = Arc<dyn Fn(LoggerError) + Send + Sync>;

/// Accepts an event and threads it through an ordered list of stages.
///
/// The output of stage *i* is the input of stage *i + 1*. Dispatch stops at
/// the first stage that fails (the error goes to the error consumer, if one
/// is set) or at the first stage that drops the event (nothing is reported).
///
/// The stage list is copy-on-write: [`put`](Proxy::put) works on the list as
/// it was when dispatch began, so a concurrent [`append`](Proxy::append) is
/// never observed half done.
#[derive(Default)]
pub struct Proxy {
    stages: RwLock<Arc<Vec<Arc<dyn Stage>>>>,
    err_consumer: RwLock<Option<ErrConsumer>>,
}

impl Proxy {
    pub fn new(stages: Vec<Arc<dyn Stage>>) -> Self {
        Self {
            stages: RwLock::new(Arc::new(stages)),
            err_consumer: RwLock::new(None),
        }
    }

    /// Append a stage to the end of the list
    pub fn append<S: Stage + 'static>(&self, stage: S) {
        self.append_arc(Arc::new(stage));
    }

    pub fn append_arc(&self, stage: Arc<dyn Stage>) {
        let mut guard = self.stages.write();
        Arc::make_mut(&mut *guard).push(stage);
    }

    /// The i-th stage, or `None` if out of range
    pub fn at(&self, i: usize) -> Option<Arc<dyn Stage>> {
        self.stages.read().get(i).cloned()
    }

    pub fn len(&self) -> usize {
        self.stages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.read().is_empty()
    }

    pub fn set_err_consumer<F>(&self, consumer: F)
    where
        F: Fn(LoggerError) + Send + Sync + 'static,
    {
        *self.err_consumer.write() = Some(Arc::new(consumer));
    }

    pub fn clear_err_consumer(&self) {
        *self.err_consumer.write() = None;
    }

    /// Dispatch an event. Errors go to the error consumer, never to the caller.
    pub fn put(&self, event: Event) {
        if let Err(e) = self.try_put(event) {
            self.consume_err(e);
        }
    }

    /// Dispatch an event and return the stage error instead of consuming it.
    ///
    /// Returns the event that left the last stage, or `None` if a stage
    /// dropped it.
    pub fn try_put(&self, event: Event) -> Result<Option<Event>> {
        let stages = Arc::clone(&*self.stages.read());

        let mut current = event;
        for (idx, stage) in stages.iter().enumerate() {
            let input = current.clone();
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                stage.map(current)
            }));

            match outcome {
                Ok(Ok(Some(next))) => current = next,
                Ok(Ok(None)) => return Ok(None),
                Ok(Err(e)) => return Err(LoggerError::stage(idx, input.rendered(), e)),
                Err(panic_info) => {
                    let message = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    return Err(LoggerError::StagePanicked {
                        index: idx,
                        message,
                    });
                }
            }
        }
        Ok(Some(current))
    }

    fn consume_err(&self, err: LoggerError) {
        let consumer = self.err_consumer.read().clone();
        if let Some(consumer) = consumer {
            consumer(err);
        }
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stages = self.stages.read();
        let names: Vec<&str> = stages.iter().map(|s| s.name()).collect();
        f.debug_struct("Proxy")
            .field("stages", &names)
            .field("err_consumer", &self.err_consumer.read().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Level, MapperFunc};
    use parking_lot::Mutex;

    /// Records the event it receives and returns a fixed outcome
    #[derive(Default)]
    struct MockStage {
        got: Mutex<Option<Event>>,
        result: Option<Event>,
        err: Option<&'static str>,
    }

    impl MockStage {
        fn passing(result: Event) -> Arc<Self> {
            Arc::new(Self {
                result: Some(result),
                ..Default::default()
            })
        }

        fn failing(err: &'static str) -> Arc<Self> {
            Arc::new(Self {
                err: Some(err),
                ..Default::default()
            })
        }

        fn got(&self) -> Option<Event> {
            self.got.lock().clone()
        }
    }

    impl Stage for MockStage {
        fn map(&self, event: Event) -> Result<Option<Event>> {
            *self.got.lock() = Some(event);
            match self.err {
                Some(msg) => Err(LoggerError::other(msg)),
                None => Ok(self.result.clone()),
            }
        }
    }

    fn first_event() -> Event {
        Event::new(Level::DEBUG, "log 1", vec![])
    }

    fn second_event() -> Event {
        Event::new(Level::INFO, "log 2", vec![])
    }

    fn capture(p: &Proxy) -> Arc<Mutex<Vec<LoggerError>>> {
        let errs = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&errs);
        p.set_err_consumer(move |e| sink.lock().push(e));
        errs
    }

    #[test]
    fn test_no_stages() {
        let p = Proxy::default();
        let errs = capture(&p);
        p.put(first_event());
        assert!(errs.lock().is_empty());
        assert_eq!(p.try_put(first_event()).unwrap(), Some(first_event()));
    }

    #[test]
    fn test_single_stage() {
        let f = MockStage::passing(first_event());
        let p = Proxy::new(vec![f.clone()]);
        p.put(first_event());
        assert_eq!(f.got(), Some(first_event()));
    }

    #[test]
    fn test_error_on_second_stage() {
        let f = MockStage::passing(second_event());
        let s = MockStage::failing("second");
        let p = Proxy::new(vec![f.clone(), s.clone()]);
        let errs = capture(&p);
        p.put(first_event());

        assert_eq!(f.got(), Some(first_event()));
        assert_eq!(s.got(), Some(second_event()));
        let errs = errs.lock();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].stage_path(), vec![1]);
        assert_eq!(errs[0].to_string(), "Map error idx 1 ev log 2: second");
    }

    #[test]
    fn test_error_on_first_stage_without_consumer() {
        let f = MockStage::failing("first");
        let s = MockStage::passing(second_event());
        let p = Proxy::new(vec![f.clone(), s.clone()]);
        p.put(first_event());

        assert_eq!(f.got(), Some(first_event()));
        assert_eq!(s.got(), None);
    }

    #[test]
    fn test_error_on_first_stage() {
        let f = MockStage::failing("first");
        let s = MockStage::passing(second_event());
        let p = Proxy::new(vec![f.clone(), s.clone()]);
        let errs = capture(&p);
        p.put(first_event());

        assert_eq!(errs.lock()[0].root_cause().to_string(), "first");
        assert_eq!(s.got(), None);
    }

    #[test]
    fn test_drop_stops_silently() {
        let drop_all: Arc<dyn Stage> = Arc::new(MapperFunc::new(|_| Ok(None)));
        let s = MockStage::passing(second_event());
        let p = Proxy::new(vec![drop_all, s.clone()]);
        let errs = capture(&p);
        p.put(first_event());

        assert_eq!(s.got(), None);
        assert!(errs.lock().is_empty());
    }

    #[test]
    fn test_pass() {
        let f = MockStage::passing(second_event());
        let s = MockStage::passing(second_event());
        let p = Proxy::new(vec![f.clone(), s.clone()]);
        let errs = capture(&p);
        p.put(first_event());

        assert_eq!(f.got(), Some(first_event()));
        assert_eq!(s.got(), Some(second_event()));
        assert!(errs.lock().is_empty());
    }

    #[test]
    fn test_modify_proxy() {
        let p = Proxy::default();
        let errs = capture(&p);
        p.put(first_event());
        assert!(p.at(0).is_none());

        let f = MockStage::passing(first_event());
        p.append_arc(f.clone());
        p.put(first_event());
        assert_eq!(f.got(), Some(first_event()));
        assert!(errs.lock().is_empty());

        let x = p.at(0).expect("stage appended");
        assert!(std::ptr::eq(
            Arc::as_ptr(&x) as *const (),
            Arc::as_ptr(&f) as *const ()
        ));
        assert!(p.at(1).is_none());
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_panicking_stage_is_reported() {
        let p = Proxy::default();
        p.append(MapperFunc::inspect(|_| panic!("stage blew up")));
        let errs = capture(&p);
        p.put(first_event());

        let errs = errs.lock();
        assert!(matches!(
            &errs[0],
            LoggerError::StagePanicked { index: 0, message } if message == "stage blew up"
        ));
    }

    #[test]
    fn test_event_text_rendered_only_on_error() {
        let calls = || crate::core::format::RENDER_CALLS.with(|c| c.get());
        let p = Proxy::new(vec![
            MockStage::passing(second_event()),
            MockStage::passing(second_event()),
        ]);
        let before = calls();
        p.put(first_event());
        assert_eq!(calls(), before);

        p.append_arc(MockStage::failing("late"));
        let err = p.try_put(first_event()).unwrap_err();
        assert_eq!(calls(), before + 1);
        assert_eq!(err.to_string(), "Map error idx 2 ev log 2: late");
    }

    #[test]
    fn test_clear_err_consumer() {
        let p = Proxy::new(vec![MockStage::failing("x")]);
        let errs = capture(&p);
        p.clear_err_consumer();
        p.put(first_event());
        assert!(errs.lock().is_empty());
    }
}
