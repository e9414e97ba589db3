//! The wheel engine: drag input, selection commits, snap settling.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use rondel_core::{EventChannel, FrameRequest, FrameScheduler, Subscription};
use rondel_data::DataSource;
use rondel_graphics::{angle_to_radian, distance_to_angle, SlotFrame};

use crate::ring::side_count;
use crate::{RenderSink, Ring, WheelError};

/// Largest fraction of the interval one ring update may rotate. Bigger
/// deltas are split so recycling and commit detection never see a jump
/// larger than this.
const STEP_FRACTION: f32 = 0.4;

/// Fraction of the interval past which the selection commits to a neighbor
/// during a live drag.
const COMMIT_FRACTION: f32 = 0.7;

/// Angle deltas below this are treated as no rotation at all.
const MIN_SCROLL_ANGLE: f32 = 1e-3;

/// Snap animation length scales with the remaining angle.
const SNAP_FRAMES_PER_DEGREE: f32 = 2.0;
const SNAP_MIN_FRAMES: usize = 2;
const SNAP_MAX_FRAMES: usize = 30;

/// Resistance curve applied when dragging past the first or last value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeCurve {
    /// Resistance grows linearly with the off-center angle.
    #[default]
    Linear,
    /// Sharper falloff; the wheel firms up close to the stop.
    Cubic,
}

/// Wheel geometry. `max_angle` is clamped into `(0, 90]` at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelConfig {
    /// Wheel radius in the host's length unit (drag distances share it).
    pub radius: f32,
    /// Angular spacing between adjacent values, in degrees.
    pub interval_angle: f32,
    /// Half-span of the visible arc, in degrees.
    pub max_angle: f32,
    /// Flattens the off-center shrink of slot labels; see [`SlotFrame::at`].
    pub scale_ratio: f32,
    pub edge_curve: EdgeCurve,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            radius: 140.0,
            interval_angle: 15.0,
            max_angle: 60.0,
            scale_ratio: 0.5,
            edge_curve: EdgeCurve::Linear,
        }
    }
}

struct SnapState {
    steps: VecDeque<f32>,
    /// Keeps the next scheduled frame alive; dropping it cancels the tick.
    #[allow(dead_code)]
    request: Option<FrameRequest>,
}

struct WheelInner<T> {
    config: WheelConfig,
    source: Box<dyn DataSource<T>>,
    ring: Ring<T>,
    /// Arena index of the selected slot.
    current: usize,
    sink: Box<dyn RenderSink>,
    /// Latched when a drag keeps pushing past the domain edge; only
    /// `scroll_end` or a data-source swap releases it.
    should_end: bool,
    snap: Option<SnapState>,
    /// Animation token: every scroll / scroll_end / data-source swap bumps
    /// it, so frames scheduled for an older generation no-op.
    generation: u64,
    recycle_span: f32,
    commit_angle: f32,
}

type ChangeBatch<T> = SmallVec<[Option<T>; 2]>;

/// The rotary virtualized list engine.
///
/// Clones share one wheel, the way a gesture adapter and a picker column
/// both hold it. All methods take `&self`; state lives behind a single
/// `RefCell` and the host delivers events serially.
pub struct Wheel<T: Clone + PartialEq + 'static> {
    inner: Rc<RefCell<WheelInner<T>>>,
    scheduler: FrameScheduler,
    changes: EventChannel<Option<T>>,
}

impl<T: Clone + PartialEq + 'static> Wheel<T> {
    /// Builds the wheel and renders its initial window.
    ///
    /// Fails fast on unusable geometry: non-positive radius, interval or max
    /// angle, or an interval too wide to fit a single neighbor inside the
    /// arc.
    pub fn new(
        source: Box<dyn DataSource<T>>,
        sink: Box<dyn RenderSink>,
        config: WheelConfig,
        scheduler: FrameScheduler,
    ) -> Result<Self, WheelError> {
        if !(config.radius > 0.0) {
            return Err(WheelError::NonPositiveRadius(config.radius));
        }
        if !(config.interval_angle > 0.0) {
            return Err(WheelError::NonPositiveInterval(config.interval_angle));
        }
        if !(config.max_angle > 0.0) {
            return Err(WheelError::NonPositiveMaxAngle(config.max_angle));
        }
        let mut config = config;
        config.max_angle = config.max_angle.min(90.0);
        if side_count(config.interval_angle, config.max_angle) < 1 {
            return Err(WheelError::IntervalExceedsArc {
                interval: config.interval_angle,
                max_angle: config.max_angle,
            });
        }

        let ring = Ring::build(source.as_ref(), config.interval_angle, config.max_angle);
        let current = ring.center();
        let recycle_span = ring.side_count() as f32 * config.interval_angle * 2.0;
        let commit_angle = config.interval_angle * COMMIT_FRACTION;

        let mut inner = WheelInner {
            config,
            source,
            ring,
            current,
            sink,
            should_end: false,
            snap: None,
            generation: 0,
            recycle_span,
            commit_angle,
        };
        Self::render_all(&mut inner);

        Ok(Self {
            inner: Rc::new(RefCell::new(inner)),
            scheduler,
            changes: EventChannel::new(),
        })
    }

    /// Fires whenever the selected value changes, during drags, snaps, and
    /// (optionally) data-source swaps.
    pub fn on_change(&self, callback: impl Fn(&Option<T>) + 'static) -> Subscription {
        self.changes.subscribe(callback)
    }

    /// The currently selected value. `None` only before the first data ever
    /// loads.
    pub fn value(&self) -> Option<T> {
        let inner = self.inner.borrow();
        inner.ring.slot(inner.current).data.clone()
    }

    /// Angle of the selected slot; 0 at rest on a notch.
    pub fn current_angle(&self) -> f32 {
        let inner = self.inner.borrow();
        inner.ring.slot(inner.current).angle
    }

    pub fn slot_count(&self) -> usize {
        self.inner.borrow().ring.capacity()
    }

    /// The effective geometry (after the `max_angle` clamp).
    pub fn config(&self) -> WheelConfig {
        self.inner.borrow().config
    }

    /// Whether a snap animation is waiting on frames.
    pub fn is_settling(&self) -> bool {
        self.inner.borrow().snap.is_some()
    }

    /// Applies a drag distance (same unit as the radius; finger up is
    /// negative) and returns the distance actually consumed.
    ///
    /// A return of `0.0` for a non-trivial input means the wheel is hard
    /// stopped against the domain edge; an inertial caller should cancel its
    /// fling and call [`scroll_end`](Self::scroll_end).
    pub fn scroll(&self, distance: f32) -> f32 {
        let (consumed, events) = {
            let mut inner = self.inner.borrow_mut();
            let angle = distance_to_angle(distance, inner.config.radius);
            if angle.abs() < MIN_SCROLL_ANGLE {
                return 0.0;
            }
            Self::interrupt(&mut inner);
            if inner.should_end {
                return 0.0;
            }
            let (applied, events) = Self::apply_scroll(&mut inner, angle);
            let consumed = angle_to_radian(applied) * inner.config.radius;
            (consumed, events)
        };
        self.emit_changes(events);
        consumed
    }

    /// Settles the wheel after release: back to the notch within half an
    /// interval or when stopped against the domain edge, one notch onward
    /// otherwise. The settling is animated frame by frame through the same
    /// ring-update path as live drags.
    pub fn scroll_end(&self) {
        let generation = {
            let mut inner = self.inner.borrow_mut();
            Self::interrupt(&mut inner);
            inner.should_end = false;

            let current = inner.ring.slot(inner.current);
            let angle = current.angle;
            let blocked = if angle < 0.0 {
                inner.source.prev(&current.data).is_none()
            } else {
                inner.source.next(&current.data).is_none()
            };

            let half = inner.config.interval_angle / 2.0;
            let total = if angle.abs() <= half || blocked {
                angle
            } else {
                angle - angle.signum() * inner.config.interval_angle
            };
            if total.abs() < MIN_SCROLL_ANGLE {
                return;
            }

            inner.snap = Some(SnapState {
                steps: ease_out_steps(total),
                request: None,
            });
            inner.generation
        };
        self.schedule_snap_frame(generation);
    }

    /// Swaps the backing source without touching ring geometry or slot
    /// identity: the selected slot re-seeds from `init()` and the rest of
    /// the window is rewritten outward from it. Cascading column updates go
    /// through here with `emit_change = false`.
    pub fn change_data_source(&self, source: Box<dyn DataSource<T>>, emit_change: bool) {
        let init = {
            let mut inner = self.inner.borrow_mut();
            Self::interrupt(&mut inner);
            inner.should_end = false;
            inner.source = source;

            let init = inner.source.init();
            let center = inner.current;
            inner.ring.slot_mut(center).data = init.clone();

            let capacity = inner.ring.capacity();
            let center_pos = inner.ring.position_of(center);
            for position in (0..center_pos).rev() {
                let below = inner.ring.arena_index(position + 1);
                let data = inner.source.prev(&inner.ring.slot(below).data);
                let arena = inner.ring.arena_index(position);
                inner.ring.slot_mut(arena).data = data;
            }
            for position in center_pos + 1..capacity {
                let above = inner.ring.arena_index(position - 1);
                let data = inner.source.next(&inner.ring.slot(above).data);
                let arena = inner.ring.arena_index(position);
                inner.ring.slot_mut(arena).data = data;
            }

            Self::render_all(&mut inner);
            log::debug!("wheel data source swapped");
            init
        };
        if emit_change {
            self.changes.emit(&init);
        }
    }

    fn emit_changes(&self, events: ChangeBatch<T>) {
        for value in events {
            self.changes.emit(&value);
        }
    }

    /// Cancels any pending snap frame and invalidates stale ones.
    fn interrupt(inner: &mut WheelInner<T>) {
        inner.generation = inner.generation.wrapping_add(1);
        inner.snap = None;
    }

    fn apply_scroll(inner: &mut WheelInner<T>, angle: f32) -> (f32, ChangeBatch<T>) {
        let step_limit = inner.config.interval_angle * STEP_FRACTION;
        let count = (angle.abs() / step_limit).ceil().max(1.0) as usize;
        let sub = angle / count as f32;

        let mut applied = 0.0;
        let mut events = ChangeBatch::new();
        for _ in 0..count {
            if inner.should_end {
                break;
            }
            let delta = Self::edge_adjusted(inner, sub);
            if delta == 0.0 {
                continue;
            }
            applied += delta;
            Self::rotate_ring(inner, delta, &mut events);
        }
        (applied, events)
    }

    /// Replaces a raw sub-delta with a shrinking one when it pushes past the
    /// domain edge, and latches the hard stop once the selection has been
    /// dragged a full commit threshold into the void.
    fn edge_adjusted(inner: &mut WheelInner<T>, raw: f32) -> f32 {
        let current = inner.ring.slot(inner.current);
        let blocked = if raw > 0.0 {
            inner.source.prev(&current.data).is_none()
        } else {
            inner.source.next(&current.data).is_none()
        };
        if !blocked {
            return raw;
        }

        let off_center = current.angle.abs();
        if off_center >= inner.commit_angle {
            if !inner.should_end {
                log::debug!("hard stop at domain edge");
            }
            inner.should_end = true;
            return 0.0;
        }

        let interval = inner.config.interval_angle;
        let ratio = ((interval - off_center) / interval).max(0.0);
        let eased = match inner.config.edge_curve {
            EdgeCurve::Linear => ratio,
            EdgeCurve::Cubic => ratio * ratio * ratio,
        };
        raw.signum() * eased
    }

    /// One ring update: rotate, recycle edge crossings, commit a neighbor
    /// arriving at center, re-render.
    fn rotate_ring(inner: &mut WheelInner<T>, delta: f32, events: &mut ChangeBatch<T>) {
        inner.ring.rotate(delta);

        let max_angle = inner.config.max_angle;
        if inner.ring.first().angle > max_angle {
            let data = inner.source.next(&inner.ring.last().data);
            log::trace!("recycling top slot to bottom");
            inner.ring.recycle_first_to_last(inner.recycle_span, data);
        } else if inner.ring.last().angle < -max_angle {
            let data = inner.source.prev(&inner.ring.first().data);
            log::trace!("recycling bottom slot to top");
            inner.ring.recycle_last_to_first(inner.recycle_span, data);
        }

        let current_angle = inner.ring.slot(inner.current).angle;
        let crossed = if delta > 0.0 {
            current_angle < -inner.commit_angle
        } else {
            current_angle > inner.commit_angle
        };
        if crossed {
            let neighbor = inner
                .ring
                .neighbor(inner.current, if delta > 0.0 { -1 } else { 1 });
            let neighbor_data = inner.ring.slot(neighbor).data.clone();
            // Never commit into the void past the domain edge.
            if neighbor_data.is_some() {
                inner.current = neighbor;
                events.push(neighbor_data);
            }
        }

        Self::render_all(inner);
    }

    fn render_all(inner: &mut WheelInner<T>) {
        let WheelInner {
            ring,
            sink,
            source,
            config,
            ..
        } = inner;
        for (id, slot) in ring.iter() {
            let frame = SlotFrame::at(slot.angle, config.radius, config.scale_ratio);
            sink.apply(id, &frame, &source.text(&slot.data));
        }
    }

    fn schedule_snap_frame(&self, generation: u64) {
        let weak = Rc::downgrade(&self.inner);
        let scheduler = self.scheduler.clone();
        let changes = self.changes.clone();
        let request = self.scheduler.request_frame(move |_| {
            Self::on_snap_frame(&weak, &scheduler, &changes, generation);
        });
        if let Some(snap) = self.inner.borrow_mut().snap.as_mut() {
            snap.request = Some(request);
        }
    }

    fn on_snap_frame(
        weak: &Weak<RefCell<WheelInner<T>>>,
        scheduler: &FrameScheduler,
        changes: &EventChannel<Option<T>>,
        generation: u64,
    ) {
        let Some(inner_rc) = weak.upgrade() else {
            return;
        };

        let mut events = ChangeBatch::new();
        let more = {
            let mut inner = inner_rc.borrow_mut();
            if inner.generation != generation {
                return;
            }
            let delta = match inner.snap.as_mut() {
                Some(snap) => {
                    snap.request = None;
                    snap.steps.pop_front()
                }
                None => return,
            };
            let Some(delta) = delta else {
                inner.snap = None;
                return;
            };
            Self::rotate_ring(&mut inner, delta, &mut events);

            let more = inner
                .snap
                .as_ref()
                .is_some_and(|snap| !snap.steps.is_empty());
            if !more {
                inner.snap = None;
                log::trace!("snap settled");
            }
            more
        };

        for value in events {
            changes.emit(&value);
        }

        if more {
            let weak_next = weak.clone();
            let scheduler_next = scheduler.clone();
            let changes_next = changes.clone();
            let request = scheduler.request_frame(move |_| {
                Self::on_snap_frame(&weak_next, &scheduler_next, &changes_next, generation);
            });
            if let Some(snap) = inner_rc.borrow_mut().snap.as_mut() {
                snap.request = Some(request);
            }
        }
    }
}

impl<T: Clone + PartialEq + 'static> Clone for Wheel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            scheduler: self.scheduler.clone(),
            changes: self.changes.clone(),
        }
    }
}

/// Per-frame deltas of a quadratic ease-out over `total` degrees.
fn ease_out_steps(total: f32) -> VecDeque<f32> {
    let count = ((total.abs() * SNAP_FRAMES_PER_DEGREE).round() as usize)
        .clamp(SNAP_MIN_FRAMES, SNAP_MAX_FRAMES);
    let mut steps = VecDeque::with_capacity(count);
    let mut last = 0.0;
    for frame in 1..=count {
        let t = frame as f32 / count as f32;
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        let position = total * eased;
        steps.push_back(position - last);
        last = position;
    }
    steps
}
