//! Bindable surface
//!
//! The rendering target a view writes properties to and receives events
//! from. The compiler never calls it; only the runtime does.

use std::cell::RefCell;
use std::rc::Rc;

use super::value::Value;
use super::RuntimeError;
use crate::binding::TargetPath;

/// Called with the event and the caller's suppression flag; returns the
/// combined flag.
pub type EventHandler = Box<dyn FnMut(&Value, bool) -> Result<bool, RuntimeError>>;

pub trait BindableSurface {
    fn set_property(&mut self, target: &TargetPath, value: &Value);
    fn add_event_listener(&mut self, target: &TargetPath, event_name: &str, handler: EventHandler) -> Disposer;
}

/// Undoes a listener registration when disposed.
pub struct Disposer(Option<Box<dyn FnOnce()>>);

impl Disposer {
    pub fn new<F: FnOnce() + 'static>(dispose: F) -> Self {
        Disposer(Some(Box::new(dispose)))
    }

    pub fn noop() -> Self {
        Disposer(None)
    }

    pub fn dispose(mut self) {
        if let Some(dispose) = self.0.take() {
            dispose();
        }
    }
}

struct Listener {
    id: usize,
    target: TargetPath,
    event_name: String,
    handler: Rc<RefCell<EventHandler>>,
}

/// Records every property write and keeps registered listeners so tests can
/// fire events at them.
#[derive(Default)]
pub struct RecordingSurface {
    writes: Vec<(TargetPath, Value)>,
    listeners: Rc<RefCell<Vec<Listener>>>,
    next_id: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> &[(TargetPath, Value)] {
        &self.writes
    }

    /// Removes and returns the writes recorded so far.
    pub fn take_writes(&mut self) -> Vec<(TargetPath, Value)> {
        std::mem::take(&mut self.writes)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Delivers `event` to the listeners on `nodes` registered for its
    /// `type`. Returns the combined suppression flag, or `caller_suppress`
    /// when nothing listens.
    ///
    /// No borrow of the listener list is held while a handler runs, so
    /// handlers may dispose listeners or fire further events. A listener
    /// disposed before its turn is skipped, and a handler is never entered
    /// twice.
    pub fn fire(&self, nodes: &[usize], event: &Value, caller_suppress: bool) -> Result<bool, RuntimeError> {
        let event_type = event.get("type");
        let matching: Vec<usize> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.target.nodes == nodes && event_type.as_str() == Some(l.event_name.as_str()))
            .map(|l| l.id)
            .collect();

        let mut suppress = caller_suppress;
        for id in matching {
            let handler = self
                .listeners
                .borrow()
                .iter()
                .find(|l| l.id == id)
                .map(|l| Rc::clone(&l.handler));
            let Some(handler) = handler else {
                continue;
            };
            let Ok(mut running) = handler.try_borrow_mut() else {
                continue;
            };
            suppress = (*running)(event, suppress)?;
        }
        Ok(suppress)
    }
}

impl BindableSurface for RecordingSurface {
    fn set_property(&mut self, target: &TargetPath, value: &Value) {
        self.writes.push((target.clone(), value.clone()));
    }

    fn add_event_listener(&mut self, target: &TargetPath, event_name: &str, handler: EventHandler) -> Disposer {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.borrow_mut().push(Listener {
            id,
            target: target.clone(),
            event_name: event_name.to_string(),
            handler: Rc::new(RefCell::new(handler)),
        });
        let listeners = Rc::downgrade(&self.listeners);
        Disposer::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|l| l.id != id);
            }
        })
    }
}
