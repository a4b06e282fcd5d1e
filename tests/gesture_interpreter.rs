use gesture_calc::geometry::Point;
use gesture_calc::gesture::landmarks::{INDEX_FINGER_TIP, LANDMARK_COUNT, THUMB_TIP};
use gesture_calc::gesture::{GestureConfig, GestureInterpreter, HandLandmarks, PinchOutcome};
use gesture_calc::keypad::default_layout;

fn hand(thumb: (i32, i32), index: (i32, i32)) -> HandLandmarks {
    let mut points = [Point::default(); LANDMARK_COUNT];
    points[THUMB_TIP] = thumb.into();
    points[INDEX_FINGER_TIP] = index.into();
    HandLandmarks::new(points)
}

#[test]
fn distance_is_euclidean() {
    let a = Point::new(100, 100);
    let b = Point::new(110, 105);
    assert!((a.distance(b) - 125f64.sqrt()).abs() < 1e-9);
    assert_eq!(Point::new(3, 4).distance(Point::new(0, 0)), 5.0);
}

#[test]
fn no_hand_means_no_pinch() {
    let mut interpreter = GestureInterpreter::default();
    let outcome = interpreter.interpret(None, &default_layout(), 0);
    assert_eq!(outcome, PinchOutcome::NoHand);
    assert_eq!(outcome.cursor(), None);
}

#[test]
fn pinch_above_the_keypad_misses() {
    let mut interpreter = GestureInterpreter::default();
    let outcome = interpreter.interpret(Some(&hand((100, 100), (110, 105))), &default_layout(), 0);
    match outcome {
        PinchOutcome::Missed { distance, cursor } => {
            assert!((distance - 11.18).abs() < 0.01);
            assert_eq!(cursor, Point::new(105, 102));
        }
        other => panic!("expected a miss, got {other:?}"),
    }
}

#[test]
fn pinch_over_a_key_selects_it() {
    let mut interpreter = GestureInterpreter::default();
    let outcome = interpreter.interpret(Some(&hand((85, 185), (95, 195))), &default_layout(), 0);
    assert_eq!(outcome.selected_label(), Some("7"));
    assert_eq!(outcome.cursor(), Some(Point::new(90, 190)));
    assert_eq!(interpreter.gate().last_click_ms(), Some(0));
}

#[test]
fn open_hand_over_a_key_does_nothing() {
    let mut interpreter = GestureInterpreter::default();
    let outcome = interpreter.interpret(Some(&hand((60, 190), (120, 190))), &default_layout(), 0);
    assert!(matches!(outcome, PinchOutcome::Open { .. }));
    assert_eq!(interpreter.gate().last_click_ms(), None);
}

#[test]
fn second_pinch_within_a_second_is_debounced() {
    let buttons = default_layout();
    let mut interpreter = GestureInterpreter::default();
    let pinch = hand((85, 185), (95, 195));

    assert!(interpreter.interpret(Some(&pinch), &buttons, 5_000).selected_label().is_some());
    assert!(matches!(
        interpreter.interpret(Some(&pinch), &buttons, 5_500),
        PinchOutcome::Debounced { .. }
    ));
    assert!(matches!(
        interpreter.interpret(Some(&pinch), &buttons, 6_000),
        PinchOutcome::Debounced { .. }
    ));
    assert_eq!(
        interpreter.interpret(Some(&pinch), &buttons, 6_001).selected_label(),
        Some("7")
    );
}

#[test]
fn debounce_interval_is_configurable() {
    let buttons = default_layout();
    let mut interpreter = GestureInterpreter::new(GestureConfig {
        debounce_ms: 100,
        ..GestureConfig::default()
    });
    let pinch = hand((285, 185), (295, 195));
    assert_eq!(interpreter.interpret(Some(&pinch), &buttons, 0).selected_label(), Some("9"));
    assert_eq!(interpreter.interpret(Some(&pinch), &buttons, 101).selected_label(), Some("9"));
}
