use super::*;

use std::cell::RefCell;
use std::rc::Rc;

use rondel_core::FrameScheduler;
use rondel_data::{CascadeFactory, CascadeNode, DateTime, DateTimeFactory, ListFactory};
use rondel_testing::{scroll_notches, RecordingSink};
use rondel_wheel::{EdgeCurve, RenderSink, WheelConfig};

fn config() -> WheelConfig {
    WheelConfig {
        radius: 140.0,
        interval_angle: 15.0,
        max_angle: 46.0,
        scale_ratio: 0.5,
        edge_curve: EdgeCurve::Linear,
    }
}

fn sinks(count: usize) -> Vec<Box<dyn RenderSink>> {
    (0..count)
        .map(|_| Box::new(RecordingSink::new()) as Box<dyn RenderSink>)
        .collect()
}

fn letters_factory() -> ListFactory<String> {
    ListFactory::new()
        .column(vec!["a".into(), "b".into(), "c".into()], 1, false)
        .unwrap()
        .column(vec!["x".into(), "y".into(), "z".into()], 0, false)
        .unwrap()
}

fn province_city_factory() -> CascadeFactory<String> {
    let tree = vec![
        CascadeNode::with_children(
            "North".to_string(),
            vec![
                CascadeNode::leaf("Harbor".to_string()),
                CascadeNode::leaf("Hills".to_string()),
            ],
        ),
        CascadeNode::with_children(
            "South".to_string(),
            vec![
                CascadeNode::leaf("Plains".to_string()),
                CascadeNode::leaf("Delta".to_string()),
                CascadeNode::leaf("Coast".to_string()),
            ],
        ),
    ];
    CascadeFactory::new(tree, 2).unwrap()
}

fn some_strings(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|v| Some(v.to_string())).collect()
}

#[test]
fn construction_seeds_both_value_tuples() {
    let scheduler = FrameScheduler::new();
    let picker = Picker::new(
        Box::new(letters_factory()),
        sinks(2),
        config(),
        scheduler,
    )
    .unwrap();

    assert_eq!(picker.values(), some_strings(&["b", "x"]));
    assert_eq!(picker.wheels().len(), 2);
}

#[test]
fn scrolling_a_column_updates_pending_only() {
    let scheduler = FrameScheduler::new();
    let picker = Picker::new(
        Box::new(letters_factory()),
        sinks(2),
        config(),
        scheduler.clone(),
    )
    .unwrap();

    scroll_notches(&picker.wheels()[0], &scheduler, -1);

    assert_eq!(picker.values(), some_strings(&["c", "x"]));
    assert_eq!(picker.wheels()[1].value(), Some("x".to_string()));
}

#[test]
fn cascade_commit_recomputes_downstream_columns() {
    let scheduler = FrameScheduler::new();
    let picker = Picker::new(
        Box::new(province_city_factory()),
        sinks(2),
        config(),
        scheduler.clone(),
    )
    .unwrap();
    assert_eq!(picker.values(), some_strings(&["North", "Harbor"]));

    let ensured = Rc::new(RefCell::new(Vec::new()));
    let ensured_in = Rc::clone(&ensured);
    let _sub = picker.on_ensure(move |values| ensured_in.borrow_mut().push(values.clone()));

    // One notch toward the later province; the city column must re-source
    // from the new province's list, not the stale one.
    scroll_notches(&picker.wheels()[0], &scheduler, -1);
    assert_eq!(picker.values(), some_strings(&["South", "Plains"]));
    assert_eq!(picker.wheels()[1].value(), Some("Plains".to_string()));

    picker.confirm();
    assert_eq!(*ensured.borrow(), vec![some_strings(&["South", "Plains"])]);
}

#[test]
fn date_cascade_clamps_downstream_values_at_the_bound() {
    let scheduler = FrameScheduler::new();
    // min 2018-08-20, max 2020-06-10, init 2019-07-15.
    let factory = DateTimeFactory::date(
        DateTime::ymd(2018, 7, 20),
        DateTime::ymd(2020, 5, 10),
        DateTime::ymd(2019, 6, 15),
    )
    .unwrap();
    let picker = Picker::new(Box::new(factory), sinks(3), config(), scheduler.clone()).unwrap();
    assert_eq!(picker.values(), vec![Some(2019), Some(6), Some(15)]);

    // Advance the year to the bound year: month clamps onto maxDate's month
    // and the day onto maxDate's day.
    scroll_notches(&picker.wheels()[0], &scheduler, -1);
    assert_eq!(picker.values(), vec![Some(2020), Some(5), Some(10)]);
}

#[test]
fn confirm_promotes_pending_and_cancel_restores_it() {
    let scheduler = FrameScheduler::new();
    let picker = Picker::new(
        Box::new(letters_factory()),
        sinks(2),
        config(),
        scheduler.clone(),
    )
    .unwrap();

    let cancelled = Rc::new(RefCell::new(0));
    let cancelled_in = Rc::clone(&cancelled);
    let _sub = picker.on_cancel(move |_| *cancelled_in.borrow_mut() += 1);

    scroll_notches(&picker.wheels()[0], &scheduler, -1);
    picker.confirm();
    assert_eq!(picker.values(), some_strings(&["c", "x"]));

    scroll_notches(&picker.wheels()[1], &scheduler, -2);
    assert_eq!(picker.values(), some_strings(&["c", "z"]));

    picker.cancel();
    assert_eq!(picker.values(), some_strings(&["c", "x"]));
    assert_eq!(picker.wheels()[1].value(), Some("x".to_string()));
    assert_eq!(*cancelled.borrow(), 1);
}

#[test]
fn set_values_commits_so_cancel_keeps_them() {
    let scheduler = FrameScheduler::new();
    let picker = Picker::new(
        Box::new(letters_factory()),
        sinks(2),
        config(),
        scheduler,
    )
    .unwrap();

    picker.set_values(&some_strings(&["c", "y"]));
    assert_eq!(picker.values(), some_strings(&["c", "y"]));

    picker.cancel();
    assert_eq!(
        picker.values(),
        some_strings(&["c", "y"]),
        "set_values is the new cancel target"
    );
}

#[test]
fn set_values_resolves_through_the_factory() {
    let scheduler = FrameScheduler::new();
    let picker = Picker::new(
        Box::new(province_city_factory()),
        sinks(2),
        config(),
        scheduler,
    )
    .unwrap();

    // A city that does not exist under the requested province falls back to
    // the province's first city.
    picker.set_values(&some_strings(&["South", "Hills"]));
    assert_eq!(picker.values(), some_strings(&["South", "Plains"]));
}

#[test]
fn mount_mismatch_fails_fast() {
    let scheduler = FrameScheduler::new();
    let result = Picker::new(
        Box::new(letters_factory()),
        sinks(3),
        config(),
        scheduler,
    );
    assert!(matches!(
        result,
        Err(PickerError::SinkCountMismatch {
            columns: 2,
            sinks: 3
        })
    ));
}

#[test]
fn empty_factory_fails_fast() {
    let scheduler = FrameScheduler::new();
    let result = Picker::new(
        Box::new(ListFactory::<String>::new()),
        sinks(0),
        config(),
        scheduler,
    );
    assert!(matches!(result, Err(PickerError::NoColumns)));
}
