//! Test hosts for driving the Rondel engine without a display.
//!
//! [`RecordingSink`] stands in for a real render host and remembers the last
//! transform and label pushed to every slot; the drive helpers move a wheel
//! through the same scroll / settle path a gesture would.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use rondel_core::FrameScheduler;
use rondel_graphics::{angle_to_radian, SlotFrame};
use rondel_wheel::{RenderSink, SlotId, Wheel};

/// Last known visual state of one slot.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedSlot {
    pub frame: SlotFrame,
    pub text: String,
}

#[derive(Default)]
struct RecordingState {
    slots: FxHashMap<SlotId, RecordedSlot>,
    applies: usize,
}

/// A render sink that records every `apply`. Clones share the recording, so
/// a test can keep one handle while the wheel owns the other.
#[derive(Clone, Default)]
pub struct RecordingSink {
    inner: Rc<RefCell<RecordingState>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, id: SlotId) -> Option<RecordedSlot> {
        self.inner.borrow().slots.get(&id).cloned()
    }

    /// Total number of `apply` calls seen.
    pub fn apply_count(&self) -> usize {
        self.inner.borrow().applies
    }

    pub fn slot_ids(&self) -> Vec<SlotId> {
        let mut ids: Vec<SlotId> = self.inner.borrow().slots.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Slot angles in window order (top of the arc first).
    pub fn angles_top_to_bottom(&self) -> Vec<f32> {
        let mut angles: Vec<f32> = self
            .inner
            .borrow()
            .slots
            .values()
            .map(|slot| slot.frame.angle)
            .collect();
        angles.sort_by(|a, b| b.partial_cmp(a).expect("slot angles are finite"));
        angles
    }

    /// Slot labels in window order (top of the arc first).
    pub fn texts_top_to_bottom(&self) -> Vec<String> {
        let state = self.inner.borrow();
        let mut slots: Vec<&RecordedSlot> = state.slots.values().collect();
        slots.sort_by(|a, b| {
            b.frame
                .angle
                .partial_cmp(&a.frame.angle)
                .expect("slot angles are finite")
        });
        slots.iter().map(|slot| slot.text.clone()).collect()
    }
}

impl RenderSink for RecordingSink {
    fn apply(&mut self, slot: SlotId, frame: &SlotFrame, text: &str) {
        let mut state = self.inner.borrow_mut();
        state.slots.insert(
            slot,
            RecordedSlot {
                frame: *frame,
                text: text.to_string(),
            },
        );
        state.applies += 1;
    }
}

/// Drag distance that rotates a wheel of `radius` by `degrees`.
pub fn distance_for_degrees(radius: f32, degrees: f32) -> f32 {
    radius * angle_to_radian(degrees)
}

/// Runs scheduled frames at a 60 Hz cadence until the scheduler goes idle.
pub fn drain_frames(scheduler: &FrameScheduler) {
    let mut frame = 0u64;
    while scheduler.pending() > 0 && frame < 10_000 {
        frame += 1;
        scheduler.advance(frame * 16_000_000);
    }
    assert_eq!(scheduler.pending(), 0, "frames never went idle");
}

/// Drags a wheel by whole notches (negative = toward later values), letting
/// it settle between notches like a real gesture would.
pub fn scroll_notches<T: Clone + PartialEq + 'static>(
    wheel: &Wheel<T>,
    scheduler: &FrameScheduler,
    notches: i32,
) {
    let config = wheel.config();
    let step = distance_for_degrees(config.radius, config.interval_angle);
    for _ in 0..notches.abs() {
        wheel.scroll(if notches > 0 { step } else { -step });
        wheel.scroll_end();
        drain_frames(scheduler);
    }
}
