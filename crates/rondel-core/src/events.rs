//! Typed event channels.
//!
//! Each component exposes one channel per event kind (a wheel's `change`, a
//! picker's `ensure`/`cancel`) instead of a stringly-keyed listener registry.
//! Subscriptions unhook on drop, mirroring the frame-callback registration
//! idiom in [`crate::FrameScheduler`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct ListenerEntry<T> {
    id: u64,
    callback: Rc<dyn Fn(&T)>,
}

struct ChannelInner<T> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<ListenerEntry<T>>>,
}

impl<T> ChannelInner<T> {
    fn remove(&self, id: u64) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(index) = listeners.iter().position(|entry| entry.id == id) {
            listeners.remove(index);
        }
    }
}

/// A single-event-kind broadcast channel.
///
/// Emission invokes listeners in subscription order against a snapshot of the
/// listener list, so a listener may subscribe or cancel reentrantly; changes
/// take effect from the next emission.
pub struct EventChannel<T> {
    inner: Rc<ChannelInner<T>>,
}

impl<T> EventChannel<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ChannelInner {
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Registers a listener. The returned [`Subscription`] detaches it when
    /// cancelled or dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription
    where
        T: 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.listeners.borrow_mut().push(ListenerEntry {
            id,
            callback: Rc::new(callback),
        });

        let inner = Rc::downgrade(&self.inner);
        Subscription {
            unhook: Some(Box::new(move || {
                if let Some(inner) = inner.upgrade() {
                    inner.remove(id);
                }
            })),
        }
    }

    /// Delivers `value` to every listener subscribed before this call.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Rc<dyn Fn(&T)>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|entry| Rc::clone(&entry.callback))
            .collect();
        for callback in snapshot {
            callback(value);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl<T> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EventChannel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Handle to one channel listener. Dropping it detaches the listener.
pub struct Subscription {
    unhook: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn cancel(mut self) {
        if let Some(unhook) = self.unhook.take() {
            unhook();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unhook) = self.unhook.take() {
            unhook();
        }
    }
}
