//! Records events delivered to a listener.

use std::cell::RefCell;
use std::rc::Rc;

/// Shared log of events, fed by the closure returned from [`sink`](Self::sink).
pub struct EventRecorder<T> {
    events: Rc<RefCell<Vec<T>>>,
}

impl<T> Clone for EventRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            events: Rc::clone(&self.events),
        }
    }
}

impl<T> Default for EventRecorder<T> {
    fn default() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T: Clone + 'static> EventRecorder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listener that appends every event it sees.
    pub fn sink(&self) -> impl Fn(&T) + 'static {
        let events = Rc::clone(&self.events);
        move |event: &T| events.borrow_mut().push(event.clone())
    }

    pub fn events(&self) -> Vec<T> {
        self.events.borrow().clone()
    }

    /// Returns recorded events and forgets them.
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn count(&self, predicate: impl Fn(&T) -> bool) -> usize {
        self.events.borrow().iter().filter(|event| predicate(event)).count()
    }
}
