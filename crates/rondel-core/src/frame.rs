//! Serial frame scheduling.
//!
//! The host owns the display clock and calls [`FrameScheduler::advance`] once
//! per frame; everything that wants a tick registers a one-shot callback and
//! keeps the returned [`FrameRequest`] alive. Dropping the request cancels
//! the callback before it fires, which is the entire cancellation model:
//! there are no locks and no in-flight ticks to race with.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Identifier for a registered frame callback.
pub type FrameCallbackId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64)>>,
}

struct SchedulerInner {
    next_id: Cell<FrameCallbackId>,
    callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    draining: Cell<bool>,
}

impl SchedulerInner {
    fn cancel(&self, id: FrameCallbackId) {
        let mut callbacks = self.callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }
}

/// Frame-callback registry driven by the host (or by a test clock).
#[derive(Clone)]
pub struct FrameScheduler {
    inner: Rc<SchedulerInner>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(SchedulerInner {
                next_id: Cell::new(0),
                callbacks: RefCell::new(VecDeque::new()),
                draining: Cell::new(false),
            }),
        }
    }

    /// Registers a one-shot callback for the next frame.
    ///
    /// The callback fires on the next [`advance`](Self::advance) unless the
    /// returned [`FrameRequest`] is cancelled or dropped first. Requests made
    /// while a frame is draining land on the frame after it.
    pub fn request_frame(&self, callback: impl FnOnce(u64) + 'static) -> FrameRequest {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.callbacks.borrow_mut().push_back(FrameCallbackEntry {
            id,
            callback: Some(Box::new(callback)),
        });
        FrameRequest {
            scheduler: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Runs every callback registered before this call, in registration
    /// order, passing `frame_time_nanos`.
    pub fn advance(&self, frame_time_nanos: u64) {
        if self.inner.draining.get() {
            log::warn!("FrameScheduler::advance re-entered from a frame callback; ignoring");
            return;
        }
        self.inner.draining.set(true);

        let mut due = std::mem::take(&mut *self.inner.callbacks.borrow_mut());
        while let Some(mut entry) = due.pop_front() {
            if let Some(callback) = entry.callback.take() {
                callback(frame_time_nanos);
            }
        }

        self.inner.draining.set(false);
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.inner.callbacks.borrow().len()
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a scheduled frame callback. Dropping it cancels the callback.
pub struct FrameRequest {
    scheduler: Weak<SchedulerInner>,
    id: Option<FrameCallbackId>,
}

impl FrameRequest {
    pub fn cancel(mut self) {
        self.cancel_in_place();
    }

    fn cancel_in_place(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(inner) = self.scheduler.upgrade() {
                inner.cancel(id);
            }
        }
    }
}

impl Drop for FrameRequest {
    fn drop(&mut self) {
        self.cancel_in_place();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_fire_in_registration_order() {
        let scheduler = FrameScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let order_a = Rc::clone(&order);
        let _a = scheduler.request_frame(move |t| order_a.borrow_mut().push(("a", t)));
        let order_b = Rc::clone(&order);
        let _b = scheduler.request_frame(move |t| order_b.borrow_mut().push(("b", t)));

        scheduler.advance(16_000_000);
        assert_eq!(
            *order.borrow(),
            vec![("a", 16_000_000), ("b", 16_000_000)]
        );
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn cancelled_request_never_fires() {
        let scheduler = FrameScheduler::new();
        let fired = Rc::new(Cell::new(false));

        let fired_in = Rc::clone(&fired);
        let request = scheduler.request_frame(move |_| fired_in.set(true));
        request.cancel();
        scheduler.advance(0);

        assert!(!fired.get());
    }

    #[test]
    fn dropped_request_never_fires() {
        let scheduler = FrameScheduler::new();
        let fired = Rc::new(Cell::new(false));

        let fired_in = Rc::clone(&fired);
        drop(scheduler.request_frame(move |_| fired_in.set(true)));
        scheduler.advance(0);

        assert!(!fired.get());
    }

    #[test]
    fn request_during_drain_waits_for_next_frame() {
        let scheduler = FrameScheduler::new();
        let times = Rc::new(RefCell::new(Vec::new()));
        let keep_alive = Rc::new(RefCell::new(Vec::new()));

        let sched = scheduler.clone();
        let times_in = Rc::clone(&times);
        let keep = Rc::clone(&keep_alive);
        let _first = scheduler.request_frame(move |t| {
            times_in.borrow_mut().push(t);
            let times_next = Rc::clone(&times_in);
            keep.borrow_mut()
                .push(sched.request_frame(move |t| times_next.borrow_mut().push(t)));
        });

        scheduler.advance(1);
        assert_eq!(*times.borrow(), vec![1]);
        scheduler.advance(2);
        assert_eq!(*times.borrow(), vec![1, 2]);
    }
}
