//! The picker: N wheels, one factory, two value tuples.

use std::cell::RefCell;
use std::rc::Rc;

use rondel_core::{EventChannel, FrameScheduler, Subscription};
use rondel_data::SourceFactory;
use rondel_wheel::{RenderSink, Wheel, WheelConfig};

use crate::PickerError;

struct PickerInner<T> {
    factory: Box<dyn SourceFactory<T>>,
    /// Values in effect after the last confirm (the cancel target).
    committed: Vec<Option<T>>,
    /// Live values, tracking every wheel commit before confirmation.
    pending: Vec<Option<T>>,
}

/// A multi-column rotary picker.
///
/// Wheel `change` events keep `pending` current; [`confirm`](Self::confirm)
/// promotes it to `committed` and [`cancel`](Self::cancel) rebuilds every
/// wheel from `committed`. With a cascadable factory, a commit in column `i`
/// re-sources columns `i+1..` before their stale ranges can be observed.
///
/// `set_values` is a commit: the pushed values become the new cancel target
/// immediately.
pub struct Picker<T: Clone + PartialEq + 'static> {
    inner: Rc<RefCell<PickerInner<T>>>,
    wheels: Vec<Wheel<T>>,
    ensures: EventChannel<Vec<Option<T>>>,
    cancels: EventChannel<()>,
    _column_subs: Vec<Subscription>,
}

impl<T: Clone + PartialEq + 'static> Picker<T> {
    /// Builds one wheel per factory column. Fails fast on an empty column
    /// set, a sink-count mismatch (the mount contract), or unusable wheel
    /// geometry.
    pub fn new(
        factory: Box<dyn SourceFactory<T>>,
        sinks: Vec<Box<dyn RenderSink>>,
        config: WheelConfig,
        scheduler: FrameScheduler,
    ) -> Result<Self, PickerError> {
        let sources = factory.create();
        if sources.is_empty() {
            return Err(PickerError::NoColumns);
        }
        if sinks.len() != sources.len() {
            return Err(PickerError::SinkCountMismatch {
                columns: sources.len(),
                sinks: sinks.len(),
            });
        }

        let mut wheels = Vec::with_capacity(sources.len());
        for (source, sink) in sources.into_iter().zip(sinks) {
            wheels.push(Wheel::new(source, sink, config, scheduler.clone())?);
        }

        let committed: Vec<Option<T>> = wheels.iter().map(Wheel::value).collect();
        let inner = Rc::new(RefCell::new(PickerInner {
            factory,
            committed: committed.clone(),
            pending: committed,
        }));

        let column_subs = wheels
            .iter()
            .enumerate()
            .map(|(column, wheel)| {
                let inner = Rc::downgrade(&inner);
                let downstream: Vec<Wheel<T>> = wheels[column + 1..].to_vec();
                wheel.on_change(move |value| {
                    let Some(inner) = inner.upgrade() else {
                        return;
                    };
                    let mut state = inner.borrow_mut();
                    state.pending[column] = value.clone();
                    if !state.factory.cascadable() {
                        return;
                    }

                    log::debug!("cascading column {column} commit downstream");
                    let sources = state.factory.change(&state.pending, Some(column));
                    for (wheel, source) in downstream.iter().zip(sources) {
                        wheel.change_data_source(source, false);
                    }
                    for (offset, wheel) in downstream.iter().enumerate() {
                        state.pending[column + 1 + offset] = wheel.value();
                    }
                })
            })
            .collect();

        Ok(Self {
            inner,
            wheels,
            ensures: EventChannel::new(),
            cancels: EventChannel::new(),
            _column_subs: column_subs,
        })
    }

    /// Fires on [`confirm`](Self::confirm) with the just-committed tuple.
    pub fn on_ensure(&self, callback: impl Fn(&Vec<Option<T>>) + 'static) -> Subscription {
        self.ensures.subscribe(callback)
    }

    /// Fires on [`cancel`](Self::cancel), after the wheels have been reset.
    pub fn on_cancel(&self, callback: impl Fn(&()) + 'static) -> Subscription {
        self.cancels.subscribe(callback)
    }

    /// The live value tuple, one entry per column.
    pub fn values(&self) -> Vec<Option<T>> {
        self.inner.borrow().pending.clone()
    }

    /// Read-only column access for host styling and introspection.
    pub fn wheels(&self) -> &[Wheel<T>] {
        &self.wheels
    }

    /// Promotes the live tuple to the committed one and emits `ensure`.
    pub fn confirm(&self) {
        let values = {
            let mut state = self.inner.borrow_mut();
            let pending = state.pending.clone();
            state.committed = pending.clone();
            pending
        };
        self.ensures.emit(&values);
    }

    /// Discards live edits: every wheel is rebuilt from the committed tuple.
    pub fn cancel(&self) {
        {
            let mut state = self.inner.borrow_mut();
            let committed = state.committed.clone();
            Self::rebuild_columns(&mut state, &self.wheels, &committed);
        }
        self.cancels.emit(&());
    }

    /// Resets every column onto `values` and commits them, making them the
    /// new cancel target.
    pub fn set_values(&self, values: &[Option<T>]) {
        let mut state = self.inner.borrow_mut();
        Self::rebuild_columns(&mut state, &self.wheels, values);
        let pending = state.pending.clone();
        state.committed = pending;
    }

    /// Pushes `factory.change(values, None)` into every wheel and refreshes
    /// `pending` from what each wheel actually resolved to (a factory may
    /// clamp or substitute a requested value).
    fn rebuild_columns(state: &mut PickerInner<T>, wheels: &[Wheel<T>], values: &[Option<T>]) {
        let sources = state.factory.change(values, None);
        for (wheel, source) in wheels.iter().zip(sources) {
            wheel.change_data_source(source, false);
        }
        state.pending = wheels.iter().map(Wheel::value).collect();
    }
}

#[cfg(test)]
#[path = "tests/picker_tests.rs"]
mod tests;
