//! Motion and timeline properties of the turtle engine

use proptest::prelude::*;
use turtlekit_engine::{Primitive, TurtleEngine};

const EPS: f64 = 1e-9;

#[test]
fn test_net_zero_displacement_returns_home() {
    let mut engine = TurtleEngine::new(false);
    engine.forward(120.0);
    engine.backward(70.0);
    engine.forward(30.0);
    engine.backward(80.0);
    assert!(engine.x_cor().abs() < EPS);
    assert!(engine.y_cor().abs() < EPS);
}

#[test]
fn test_square_returns_to_start() {
    let mut engine = TurtleEngine::new(false);
    for _ in 0..4 {
        engine.forward(100.0);
        engine.right(90.0);
    }
    assert!(engine.x_cor().abs() < 1e-6);
    assert!(engine.y_cor().abs() < 1e-6);
    assert_eq!(engine.primitives().len(), 4);
}

#[test]
fn test_recorded_poses_interpolate_linearly() {
    let mut engine = TurtleEngine::new(true);
    engine.set_heading(0.0);
    engine.forward(40.0);

    let frames = engine.frames();
    assert_eq!(frames.len(), 4);
    for (i, frame) in frames.iter().enumerate() {
        assert!((frame.pose.x - 10.0 * i as f64).abs() < EPS);
        assert!(frame.pose.y.abs() < EPS);
    }
    assert!((engine.x_cor() - 40.0).abs() < EPS);
}

#[test]
fn test_frame_growth_is_monotonic() {
    let mut engine = TurtleEngine::new(true);
    engine.forward(40.0);
    engine.right(90.0);
    engine.forward(20.0);
    engine.dot(None, None).unwrap();

    let frames = engine.frames();
    assert_eq!(frames.len(), 9);
    for pair in frames.windows(2) {
        assert!(pair[0].primitives.len() < pair[1].primitives.len());
    }
}

#[test]
fn test_fill_region_renders_with_fill_color_at_close_time() {
    let mut engine = TurtleEngine::new(false);
    engine.set_fill_color("green").unwrap();
    engine.begin_fill();
    engine.forward(10.0);
    engine.right(120.0);
    engine.forward(10.0);
    engine.right(120.0);
    engine.forward(10.0);
    // Color change before close wins; commit uses the current fill color.
    engine.set_fill_color("orange").unwrap();
    engine.end_fill();
    assert_eq!(engine.fills()[0].color, "orange".parse().unwrap());
}

#[test]
fn test_circle_heading_wraps_through_full_turn() {
    for extent in [90.0, 180.0, 360.0, 720.0] {
        let mut engine = TurtleEngine::new(false);
        engine.circle(40.0, extent);
        assert!(
            (engine.heading() - (90.0 - extent)).abs() < 1e-6,
            "extent {} ended at {}",
            extent,
            engine.heading()
        );
    }
}

#[test]
fn test_segment_colors_frozen_at_emit_time() {
    let mut engine = TurtleEngine::new(false);
    engine.forward(10.0);
    engine.set_pen_color("red").unwrap();
    engine.forward(10.0);

    match (&engine.primitives()[0], &engine.primitives()[1]) {
        (Primitive::Segment { color: first, .. }, Primitive::Segment { color: second, .. }) => {
            assert_ne!(first, second);
        }
        _ => panic!("expected two segments"),
    }
}

proptest! {
    #[test]
    fn prop_left_then_right_restores_heading(whole in -4000i32..4000, quarters in 0u8..4) {
        // Quarter-degree angles are exact in binary, so the round trip
        // restores the heading bit for bit.
        let angle = f64::from(whole) + f64::from(quarters) * 0.25;
        let mut engine = TurtleEngine::new(false);
        let before = engine.heading();
        engine.left(angle);
        engine.right(angle);
        prop_assert_eq!(engine.heading(), before);
    }

    #[test]
    fn prop_forward_backward_cancels(distance in -500.0f64..500.0, turn in -360.0f64..360.0) {
        let mut engine = TurtleEngine::new(false);
        engine.right(turn);
        engine.forward(distance);
        engine.backward(distance);
        prop_assert!(engine.x_cor().abs() < 1e-6);
        prop_assert!(engine.y_cor().abs() < 1e-6);
    }

    #[test]
    fn prop_home_always_restores_origin(x in -300.0f64..300.0, y in -300.0f64..300.0, turn in -720.0f64..720.0) {
        let mut engine = TurtleEngine::new(false);
        engine.goto(x, y);
        engine.left(turn);
        engine.home();
        prop_assert_eq!(engine.x_cor(), 0.0);
        prop_assert_eq!(engine.y_cor(), 0.0);
        prop_assert_eq!(engine.heading(), 90.0);
    }
}
