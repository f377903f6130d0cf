//! End-to-end script execution against the engine

use turtlekit_engine::TurtleEngine;
use turtlekit_script::run_script;

#[test]
fn test_full_lesson_script() {
    let src = "\
import turtle as t

t.pencolor('blue')
for i in range(4):
    t.forward(100)
    t.right(90)
t.done()
";
    let mut engine = TurtleEngine::new(false);
    run_script(src, &mut engine).unwrap();
    assert_eq!(engine.primitives().len(), 4);
    assert!(engine.x_cor().abs() < 1e-6);
}

#[test]
fn test_filled_triangle_script() {
    let src = "\
t.fillcolor('red')
t.begin_fill()
for i in range(3):
    t.forward(80)
    t.left(120)
t.end_fill()
";
    let mut engine = TurtleEngine::new(false);
    run_script(src, &mut engine).unwrap();
    assert_eq!(engine.fills().len(), 1);
    assert_eq!(engine.fills()[0].points.len(), 4);
}

#[test]
fn test_animation_recording_through_script() {
    let mut engine = TurtleEngine::new(true);
    run_script("t.forward(40)\n", &mut engine).unwrap();
    assert_eq!(engine.frames().len(), 4);
}

#[test]
fn test_error_carries_readable_message() {
    let mut engine = TurtleEngine::new(false);
    let err = run_script("t.forward(10)\nt.spin()\n", &mut engine).unwrap_err();
    assert_eq!(err.to_string(), "turtle has no attribute 'spin'");
    // Work done before the failure is still in the engine; the driver
    // discards it by dropping the engine.
    assert_eq!(engine.primitives().len(), 1);
}

#[test]
fn test_syntax_error_reports_original_line() {
    let src = "import turtle\nt.forward(10)\nt.forward(\n";
    let mut engine = TurtleEngine::new(false);
    let err = run_script(src, &mut engine).unwrap_err();
    assert!(err.to_string().contains("line 3"), "got: {}", err);
}

#[test]
fn test_input_driven_polygon() {
    let src = "\
sides = int(input('Enter the number of sides: '))
angle = 360 / sides
for i in range(sides):
    t.forward(50)
    t.right(angle)
";
    let mut engine = TurtleEngine::new(false);
    run_script(src, &mut engine).unwrap();
    assert_eq!(engine.primitives().len(), 6);
    assert!(engine.x_cor().abs() < 1e-6);
    assert!(engine.y_cor().abs() < 1e-6);
}

#[test]
fn test_comments_and_blank_lines() {
    let src = "\
# draw two strokes

t.forward(10)  # first

t.right(90)
t.forward(10)
";
    let mut engine = TurtleEngine::new(false);
    run_script(src, &mut engine).unwrap();
    assert_eq!(engine.primitives().len(), 2);
}

#[test]
fn test_mainloop_and_exitonclick_scrubbed() {
    let src = "t.forward(10)\nturtle.mainloop()\nt.exitonclick()\n";
    let mut engine = TurtleEngine::new(false);
    run_script(src, &mut engine).unwrap();
    assert_eq!(engine.primitives().len(), 1);
}
