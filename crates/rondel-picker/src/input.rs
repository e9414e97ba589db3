//! Binding a gesture source to one wheel column.

use rondel_core::Subscription;
use rondel_motion::MotionTracker;
use rondel_wheel::Wheel;

/// Feeds a [`MotionTracker`]'s delta streams into a wheel: move deltas drive
/// [`Wheel::scroll`], the inertial stream keeps driving it after release,
/// and the terminal zero delta settles the wheel. A hard stop against the
/// domain edge (zero consumed distance) cancels the tracker's inertia and
/// settles immediately.
///
/// Dropping the binding detaches both streams.
pub struct WheelInput {
    _move_sub: Subscription,
    _end_sub: Subscription,
}

impl WheelInput {
    pub fn bind<T: Clone + PartialEq + 'static>(
        wheel: &Wheel<T>,
        tracker: &MotionTracker,
    ) -> Self {
        let move_wheel = wheel.clone();
        let move_sub = tracker.on_move(move |delta| {
            move_wheel.scroll(delta.y);
        });

        let end_wheel = wheel.clone();
        let end_tracker = tracker.clone();
        let end_sub = tracker.on_end(move |delta| {
            if delta.is_zero() {
                end_wheel.scroll_end();
                return;
            }
            let consumed = end_wheel.scroll(delta.y);
            if consumed == 0.0 {
                log::debug!("wheel hard-stopped; cancelling inertia");
                end_tracker.clear_inertia_scroll();
                end_wheel.scroll_end();
            }
        });

        Self {
            _move_sub: move_sub,
            _end_sub: end_sub,
        }
    }
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
