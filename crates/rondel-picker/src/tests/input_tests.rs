use super::*;

use rondel_core::FrameScheduler;
use rondel_data::{DataSource, IndexedSource};
use rondel_motion::{Axis, MotionTracker};
use rondel_testing::{distance_for_degrees, drain_frames, RecordingSink};
use rondel_wheel::{EdgeCurve, Wheel, WheelConfig};

fn config() -> WheelConfig {
    WheelConfig {
        radius: 140.0,
        interval_angle: 15.0,
        max_angle: 46.0,
        scale_ratio: 0.5,
        edge_curve: EdgeCurve::Linear,
    }
}

fn build_wheel(
    init: usize,
    looping: bool,
    scheduler: &FrameScheduler,
) -> (Wheel<i32>, RecordingSink) {
    let source: Box<dyn DataSource<i32>> =
        Box::new(IndexedSource::new((0..11).collect(), init, looping).unwrap());
    let sink = RecordingSink::new();
    let wheel = Wheel::new(source, Box::new(sink.clone()), config(), scheduler.clone()).unwrap();
    (wheel, sink)
}

#[test]
fn slow_drag_commits_one_notch_through_the_tracker() {
    let scheduler = FrameScheduler::new();
    let (wheel, _) = build_wheel(5, false, &scheduler);
    let tracker = MotionTracker::new(Axis::Y, scheduler.clone());
    let _input = WheelInput::bind(&wheel, &tracker);

    // Finger moves up by one notch of arc length, slowly enough that no
    // inertia starts.
    let notch = distance_for_degrees(140.0, 15.0);
    tracker.touch_start(0, 50.0, 400.0);
    tracker.touch_move(80, 50.0, 400.0 - notch);
    tracker.touch_end(200);
    drain_frames(&scheduler);

    assert_eq!(wheel.value(), Some(6));
    assert!(wheel.current_angle().abs() < 1e-2);
    assert!(!tracker.is_flinging());
}

#[test]
fn fling_carries_the_wheel_several_notches_and_settles() {
    let scheduler = FrameScheduler::new();
    let (wheel, _) = build_wheel(5, true, &scheduler);
    let tracker = MotionTracker::new(Axis::Y, scheduler.clone());
    let _input = WheelInput::bind(&wheel, &tracker);

    // A brisk upward flick: ~1000 px/s at release.
    tracker.touch_start(0, 50.0, 400.0);
    for step in 1..=5i64 {
        tracker.touch_move(step * 10, 50.0, 400.0 - step as f32 * 10.0);
    }
    tracker.touch_end(55);
    assert!(tracker.is_flinging());
    drain_frames(&scheduler);

    assert!(!tracker.is_flinging());
    assert!(!wheel.is_settling());
    assert!(
        wheel.current_angle().abs() < 1e-2,
        "wheel settles on a notch after inertia, angle {}",
        wheel.current_angle()
    );
    assert_ne!(wheel.value(), Some(5), "inertia carried past the start value");
}

#[test]
fn fling_into_the_domain_edge_cancels_inertia_and_clamps() {
    let scheduler = FrameScheduler::new();
    let (wheel, _) = build_wheel(8, false, &scheduler);
    let tracker = MotionTracker::new(Axis::Y, scheduler.clone());
    let _input = WheelInput::bind(&wheel, &tracker);

    // A hard upward flick toward later values; the list ends at 10.
    tracker.touch_start(0, 50.0, 800.0);
    for step in 1..=5i64 {
        tracker.touch_move(step * 10, 50.0, 800.0 - step as f32 * 40.0);
    }
    tracker.touch_end(55);
    drain_frames(&scheduler);

    assert_eq!(wheel.value(), Some(10), "clamped at the last value");
    assert!(!tracker.is_flinging(), "hard stop cancelled the fling");
    assert!(!wheel.is_settling());
    assert!(wheel.current_angle().abs() < 1e-2, "settled back onto the notch");
}

#[test]
fn dropping_the_binding_detaches_the_streams() {
    let scheduler = FrameScheduler::new();
    let (wheel, _) = build_wheel(5, false, &scheduler);
    let tracker = MotionTracker::new(Axis::Y, scheduler.clone());
    let input = WheelInput::bind(&wheel, &tracker);
    drop(input);

    tracker.touch_start(0, 50.0, 400.0);
    tracker.touch_move(16, 50.0, 300.0);
    tracker.touch_end(32);
    drain_frames(&scheduler);

    assert_eq!(wheel.value(), Some(5), "unbound wheel never moves");
    assert_eq!(wheel.current_angle(), 0.0);
}
