//! Gesture tracking and the inertial fling stream.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rondel_core::{EventChannel, FrameRequest, FrameScheduler, Subscription};

use crate::{Axis, MotionDelta, VelocityTracker1D};

/// Release speeds below this (px/sec) end the gesture without inertia.
const FLING_START_VELOCITY: f32 = 60.0;

/// The fling stream stops (and emits its terminal zero delta) once the
/// decayed speed falls below this (px/sec).
const FLING_STOP_VELOCITY: f32 = 30.0;

/// Maximum release speed in px/sec. Matches the platform convention the
/// widget mirrors (Android's ViewConfiguration maximum fling velocity).
const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Velocity retained per 60 Hz frame during inertia. Applied as
/// `DECAY_PER_FRAME^(dt / 16.7ms)` so variable frame rates decay alike.
const DECAY_PER_FRAME: f32 = 0.95;

const REFERENCE_FRAME_MS: f32 = 1_000.0 / 60.0;

struct FlingState {
    velocity_x: f32,
    velocity_y: f32,
    last_frame_nanos: Option<u64>,
    request: Option<FrameRequest>,
}

struct TrackerInner {
    last_position: Option<(f32, f32)>,
    tracker_x: VelocityTracker1D,
    tracker_y: VelocityTracker1D,
    fling: Option<FlingState>,
}

/// Touch-gesture source: per-move deltas plus a post-release inertial stream.
///
/// The host feeds `touch_start` / `touch_move` / `touch_end` with its own
/// timestamps. Move deltas go to the [`on_move`](Self::on_move) channel; after
/// release the fling deltas go to the [`on_end`](Self::on_end) channel,
/// terminated by [`MotionDelta::ZERO`]. Both channels carry axis-filtered
/// values.
pub struct MotionTracker {
    axis: Axis,
    scheduler: FrameScheduler,
    moves: EventChannel<MotionDelta>,
    ends: EventChannel<MotionDelta>,
    inner: Rc<RefCell<TrackerInner>>,
}

impl MotionTracker {
    pub fn new(axis: Axis, scheduler: FrameScheduler) -> Self {
        Self {
            axis,
            scheduler,
            moves: EventChannel::new(),
            ends: EventChannel::new(),
            inner: Rc::new(RefCell::new(TrackerInner {
                last_position: None,
                tracker_x: VelocityTracker1D::new(),
                tracker_y: VelocityTracker1D::new(),
                fling: None,
            })),
        }
    }

    /// Subscribes to per-move deltas during an active drag.
    pub fn on_move(&self, callback: impl Fn(&MotionDelta) + 'static) -> Subscription {
        self.moves.subscribe(callback)
    }

    /// Subscribes to the post-release stream: zero or more inertial deltas,
    /// then exactly one zero delta.
    pub fn on_end(&self, callback: impl Fn(&MotionDelta) + 'static) -> Subscription {
        self.ends.subscribe(callback)
    }

    pub fn touch_start(&self, time_ms: i64, x: f32, y: f32) {
        self.clear_inertia_scroll();
        let mut inner = self.inner.borrow_mut();
        inner.tracker_x.reset();
        inner.tracker_y.reset();
        inner.tracker_x.add_position(time_ms, x);
        inner.tracker_y.add_position(time_ms, y);
        inner.last_position = Some((x, y));
    }

    pub fn touch_move(&self, time_ms: i64, x: f32, y: f32) {
        let delta = {
            let mut inner = self.inner.borrow_mut();
            let Some((last_x, last_y)) = inner.last_position else {
                return;
            };
            inner.tracker_x.add_position(time_ms, x);
            inner.tracker_y.add_position(time_ms, y);
            inner.last_position = Some((x, y));
            self.filter(x - last_x, y - last_y)
        };
        self.moves.emit(&delta);
    }

    /// Ends the drag. Fast releases start the inertial stream; slow ones emit
    /// the terminal zero delta immediately.
    pub fn touch_end(&self, _time_ms: i64) {
        let (velocity_x, velocity_y) = {
            let mut inner = self.inner.borrow_mut();
            if inner.last_position.take().is_none() {
                return;
            }
            let raw = self.filter(
                inner.tracker_x.velocity_capped(MAX_FLING_VELOCITY),
                inner.tracker_y.velocity_capped(MAX_FLING_VELOCITY),
            );
            (raw.x, raw.y)
        };

        let speed = (velocity_x * velocity_x + velocity_y * velocity_y).sqrt();
        if speed < FLING_START_VELOCITY {
            self.ends.emit(&MotionDelta::ZERO);
            return;
        }

        log::debug!("starting inertial fling at {speed:.0} px/s");
        self.inner.borrow_mut().fling = Some(FlingState {
            velocity_x,
            velocity_y,
            last_frame_nanos: None,
            request: None,
        });
        Self::schedule_fling_frame(&self.inner, &self.scheduler, &self.ends);
    }

    /// Cancels an in-flight fling before its next frame. No terminal zero is
    /// emitted; the caller initiated the cancellation and settles the wheel
    /// itself.
    pub fn clear_inertia_scroll(&self) {
        if let Some(fling) = self.inner.borrow_mut().fling.take() {
            drop(fling.request);
        }
    }

    /// Whether an inertial stream is currently scheduled.
    pub fn is_flinging(&self) -> bool {
        self.inner.borrow().fling.is_some()
    }

    fn filter(&self, x: f32, y: f32) -> MotionDelta {
        match self.axis {
            Axis::X => MotionDelta { x, y: 0.0 },
            Axis::Y => MotionDelta { x: 0.0, y },
            Axis::Both => MotionDelta { x, y },
        }
    }

    fn schedule_fling_frame(
        inner: &Rc<RefCell<TrackerInner>>,
        scheduler: &FrameScheduler,
        ends: &EventChannel<MotionDelta>,
    ) {
        let weak = Rc::downgrade(inner);
        let scheduler_next = scheduler.clone();
        let ends_next = ends.clone();
        let request = scheduler.request_frame(move |frame_time_nanos| {
            Self::on_fling_frame(&weak, &scheduler_next, &ends_next, frame_time_nanos);
        });
        if let Some(fling) = inner.borrow_mut().fling.as_mut() {
            fling.request = Some(request);
        }
    }

    fn on_fling_frame(
        weak: &Weak<RefCell<TrackerInner>>,
        scheduler: &FrameScheduler,
        ends: &EventChannel<MotionDelta>,
        frame_time_nanos: u64,
    ) {
        let Some(inner) = weak.upgrade() else {
            return;
        };

        // Decide the frame's delta with the borrow released before emitting,
        // so a listener may call clear_inertia_scroll() reentrantly.
        let emit = {
            let mut state = inner.borrow_mut();
            let Some(fling) = state.fling.as_mut() else {
                return;
            };
            fling.request = None;

            match fling.last_frame_nanos {
                None => {
                    fling.last_frame_nanos = Some(frame_time_nanos);
                    None
                }
                Some(last) => {
                    let dt_ms = frame_time_nanos.saturating_sub(last) as f32 / 1_000_000.0;
                    fling.last_frame_nanos = Some(frame_time_nanos);
                    let dt_s = dt_ms / 1_000.0;
                    let delta = MotionDelta {
                        x: fling.velocity_x * dt_s,
                        y: fling.velocity_y * dt_s,
                    };
                    let decay = DECAY_PER_FRAME.powf(dt_ms / REFERENCE_FRAME_MS);
                    fling.velocity_x *= decay;
                    fling.velocity_y *= decay;

                    let speed = (fling.velocity_x * fling.velocity_x
                        + fling.velocity_y * fling.velocity_y)
                        .sqrt();
                    if speed < FLING_STOP_VELOCITY {
                        state.fling = None;
                        Some((delta, true))
                    } else {
                        Some((delta, false))
                    }
                }
            }
        };

        match emit {
            None => Self::schedule_fling_frame(&inner, scheduler, ends),
            Some((delta, finished)) => {
                if !delta.is_zero() {
                    ends.emit(&delta);
                }
                if finished {
                    ends.emit(&MotionDelta::ZERO);
                } else if inner.borrow().fling.is_some() {
                    Self::schedule_fling_frame(&inner, scheduler, ends);
                }
            }
        }
    }
}

impl Clone for MotionTracker {
    fn clone(&self) -> Self {
        Self {
            axis: self.axis,
            scheduler: self.scheduler.clone(),
            moves: self.moves.clone(),
            ends: self.ends.clone(),
            inner: Rc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
#[path = "tests/tracker_tests.rs"]
mod tests;
