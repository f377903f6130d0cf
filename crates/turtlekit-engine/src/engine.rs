//! The turtle motion/state engine
//!
//! Mirrors the classic turtle-graphics verb surface. Every mutation goes
//! through a public method; the script layer holds the engine as the sole
//! capability object reachable from learner code.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use turtlekit_core::constants::{
    CIRCLE_ANIMATION_STEPS, CIRCLE_DEGREES_PER_STEP, FORWARD_ANIMATION_STEPS, HOME_HEADING,
};
use turtlekit_core::{Color, EngineError, Point, Pose};

use crate::primitives::{FillRegion, Frame, Primitive};

/// Pen attributes governing what motion verbs emit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenState {
    /// Whether motion emits visible primitives
    pub down: bool,
    /// Stroke color for segments and dots
    pub color: Color,
    /// Color committed with fill regions
    pub fill_color: Color,
    /// Pen width; feeds the default dot diameter
    pub size: i32,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            down: true,
            color: Color::BLACK,
            fill_color: Color::BLACK,
            size: 1,
        }
    }
}

/// The fixed set of turtle glyph shapes a script may select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurtleShape {
    Arrow,
    Turtle,
    Circle,
    Square,
    Triangle,
    Classic,
}

impl Default for TurtleShape {
    fn default() -> Self {
        Self::Classic
    }
}

impl FromStr for TurtleShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arrow" => Ok(Self::Arrow),
            "turtle" => Ok(Self::Turtle),
            "circle" => Ok(Self::Circle),
            "square" => Ok(Self::Square),
            "triangle" => Ok(Self::Triangle),
            "classic" => Ok(Self::Classic),
            _ => Err(format!("unknown shape: {}", s)),
        }
    }
}

impl std::fmt::Display for TurtleShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Arrow => "arrow",
            Self::Turtle => "turtle",
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Triangle => "triangle",
            Self::Classic => "classic",
        };
        write!(f, "{}", name)
    }
}

/// Turtle motion simulator
///
/// Accumulates drawing state while a script runs. With frame recording
/// enabled, commit events (pen-down sub-moves, pen-down gotos, fill closes,
/// dots, arc completions) each capture a [`Frame`] for animation playback.
#[derive(Debug, Clone)]
pub struct TurtleEngine {
    pose: Pose,
    pen: PenState,
    speed: i64,
    visible: bool,
    shape: TurtleShape,
    filling: bool,
    fill_points: Vec<Point>,
    primitives: Vec<Primitive>,
    fills: Vec<FillRegion>,
    record_frames: bool,
    frames: Vec<Frame>,
}

impl TurtleEngine {
    /// Create a fresh engine at the home pose
    ///
    /// `record_frames` enables the animation timeline; in static mode only
    /// the terminal state matters and no frames are captured.
    pub fn new(record_frames: bool) -> Self {
        Self {
            pose: Pose::home(),
            pen: PenState::default(),
            speed: 6,
            visible: true,
            shape: TurtleShape::default(),
            filling: false,
            fill_points: Vec::new(),
            primitives: Vec::new(),
            fills: Vec::new(),
            record_frames,
            frames: Vec::new(),
        }
    }

    fn save_frame(&mut self) {
        if self.record_frames {
            self.frames.push(Frame {
                primitives: self.primitives.clone(),
                fills: self.fills.clone(),
                pose: self.pose,
            });
        }
    }

    /// One straight move along the current heading.
    ///
    /// The frame (when `capture`) is recorded after the segment but before
    /// the pose update, so animation playback shows the turtle at the start
    /// of the stroke it just drew.
    fn advance(&mut self, distance: f64, capture: bool) {
        let (dx, dy) = self.pose.direction();
        let to = Point::new(self.pose.x + distance * dx, self.pose.y + distance * dy);

        if self.pen.down {
            self.primitives.push(Primitive::Segment {
                from: self.pose.point(),
                to,
                color: self.pen.color,
            });
            if capture {
                self.save_frame();
            }
        }

        self.pose.x = to.x;
        self.pose.y = to.y;

        if self.filling {
            self.fill_points.push(to);
        }
    }

    // === Motion ===

    /// Advance along the current heading.
    ///
    /// While recording, a non-zero move is split into
    /// [`FORWARD_ANIMATION_STEPS`] equal sub-steps so each pen-down sub-step
    /// yields its own segment and frame.
    pub fn forward(&mut self, distance: f64) {
        if self.record_frames && distance != 0.0 {
            let step = distance / f64::from(FORWARD_ANIMATION_STEPS);
            for _ in 0..FORWARD_ANIMATION_STEPS {
                self.advance(step, true);
            }
        } else {
            self.advance(distance, false);
        }
    }

    pub fn backward(&mut self, distance: f64) {
        self.forward(-distance);
    }

    /// Turn clockwise; heading is not range-normalized
    pub fn right(&mut self, angle: f64) {
        self.pose.heading -= angle;
    }

    /// Turn counter-clockwise
    pub fn left(&mut self, angle: f64) {
        self.pose.heading += angle;
    }

    /// Move straight to an absolute point, no sub-step subdivision
    pub fn goto(&mut self, x: f64, y: f64) {
        let to = Point::new(x, y);

        if self.pen.down {
            self.primitives.push(Primitive::Segment {
                from: self.pose.point(),
                to,
                color: self.pen.color,
            });
            self.save_frame();
        }

        self.pose.x = x;
        self.pose.y = y;

        if self.filling {
            self.fill_points.push(to);
        }
    }

    pub fn set_x(&mut self, x: f64) {
        self.goto(x, self.pose.y);
    }

    pub fn set_y(&mut self, y: f64) {
        self.goto(self.pose.x, y);
    }

    /// Set heading directly; no motion, no primitive
    pub fn set_heading(&mut self, to_angle: f64) {
        self.pose.heading = to_angle;
    }

    /// Return to the origin facing up
    pub fn home(&mut self) {
        self.goto(0.0, 0.0);
        self.set_heading(HOME_HEADING);
    }

    /// Approximate an arc with short chord steps.
    ///
    /// Recording mode always uses [`CIRCLE_ANIMATION_STEPS`] chords and
    /// captures a single frame at arc completion; static mode uses one chord
    /// per [`CIRCLE_DEGREES_PER_STEP`] degrees of extent, at least one.
    /// Positive radius turns right, negative turns left.
    pub fn circle(&mut self, radius: f64, extent: f64) {
        let steps = if self.record_frames {
            CIRCLE_ANIMATION_STEPS
        } else {
            ((extent.abs() / CIRCLE_DEGREES_PER_STEP).floor() as u32).max(1)
        };

        let step_angle = extent / f64::from(steps);
        let chord = 2.0 * radius.abs() * (step_angle.abs() / 2.0).to_radians().sin();

        // Suspend the timeline so the chords do not each record a frame.
        let was_recording = self.record_frames;
        self.record_frames = false;

        for _ in 0..steps {
            self.forward(chord);
            if radius > 0.0 {
                self.right(step_angle);
            } else {
                self.left(step_angle);
            }
        }

        self.record_frames = was_recording;
        self.save_frame();
    }

    // === Pen control ===

    pub fn pen_up(&mut self) {
        self.pen.down = false;
    }

    pub fn pen_down(&mut self) {
        self.pen.down = true;
    }

    pub fn is_down(&self) -> bool {
        self.pen.down
    }

    pub fn set_pen_color(&mut self, name: &str) -> Result<(), EngineError> {
        self.pen.color = Color::parse(name)?;
        Ok(())
    }

    pub fn pen_color(&self) -> Color {
        self.pen.color
    }

    pub fn set_fill_color(&mut self, name: &str) -> Result<(), EngineError> {
        self.pen.fill_color = Color::parse(name)?;
        Ok(())
    }

    pub fn fill_color(&self) -> Color {
        self.pen.fill_color
    }

    pub fn set_pen_size(&mut self, width: i32) {
        self.pen.size = width;
    }

    pub fn pen_size(&self) -> i32 {
        self.pen.size
    }

    // === Filling ===

    /// Open a fill bracket, seeding the buffer with the current point
    pub fn begin_fill(&mut self) {
        self.filling = true;
        self.fill_points = vec![self.pose.point()];
    }

    /// Close the fill bracket.
    ///
    /// Commits a region only when more than two points accumulated; the
    /// filling flag and point buffer are cleared either way.
    pub fn end_fill(&mut self) {
        if self.filling && self.fill_points.len() > 2 {
            debug!(points = self.fill_points.len(), "committing fill region");
            self.fills.push(FillRegion {
                points: std::mem::take(&mut self.fill_points),
                color: self.pen.fill_color,
            });
            self.save_frame();
        }
        self.filling = false;
        self.fill_points.clear();
    }

    // === Markers ===

    /// Leave a round marker at the current point without moving.
    ///
    /// `size` defaults to `max(pen_size + 4, 2 * pen_size)`, `color` to the
    /// pen color.
    pub fn dot(&mut self, size: Option<f64>, color: Option<&str>) -> Result<(), EngineError> {
        let diameter = size.unwrap_or_else(|| {
            let pen = f64::from(self.pen.size);
            (pen + 4.0).max(2.0 * pen)
        });
        let color = match color {
            Some(name) => Color::parse(name)?,
            None => self.pen.color,
        };

        self.primitives.push(Primitive::Dot {
            at: self.pose.point(),
            color,
            diameter,
        });
        self.save_frame();
        Ok(())
    }

    // === State queries ===

    pub fn position(&self) -> Point {
        self.pose.point()
    }

    pub fn x_cor(&self) -> f64 {
        self.pose.x
    }

    pub fn y_cor(&self) -> f64 {
        self.pose.y
    }

    pub fn heading(&self) -> f64 {
        self.pose.heading
    }

    /// Euclidean distance from the current point
    pub fn distance(&self, x: f64, y: f64) -> f64 {
        self.pose.point().distance_to(Point::new(x, y))
    }

    /// Speed is retained for command-surface compatibility only; it has no
    /// effect on output.
    pub fn set_speed(&mut self, speed: i64) {
        self.speed = speed;
    }

    pub fn speed(&self) -> i64 {
        self.speed
    }

    /// Select a glyph shape; unrecognized names are silently ignored
    pub fn set_shape(&mut self, name: &str) {
        if let Ok(shape) = name.parse() {
            self.shape = shape;
        }
    }

    pub fn shape(&self) -> TurtleShape {
        self.shape
    }

    pub fn hide_turtle(&mut self) {
        self.visible = false;
    }

    pub fn show_turtle(&mut self) {
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    // === Output ===

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn fills(&self) -> &[FillRegion] {
        &self.fills
    }

    /// The recorded animation timeline; empty unless recording was enabled
    /// and at least one commit event happened
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn is_recording(&self) -> bool {
        self.record_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_engine_at_home() {
        let engine = TurtleEngine::new(false);
        assert_eq!(engine.pose(), Pose::home());
        assert!(engine.is_down());
        assert!(engine.is_visible());
        assert_eq!(engine.pen_size(), 1);
        assert_eq!(engine.speed(), 6);
        assert_eq!(engine.shape(), TurtleShape::Classic);
    }

    #[test]
    fn test_forward_static_single_segment() {
        let mut engine = TurtleEngine::new(false);
        engine.forward(40.0);
        assert_eq!(engine.primitives().len(), 1);
        assert_eq!(engine.frames().len(), 0);
        assert!(engine.x_cor().abs() < 1e-9);
        assert!((engine.y_cor() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_forward_recording_subdivides() {
        let mut engine = TurtleEngine::new(true);
        engine.forward(40.0);
        assert_eq!(engine.primitives().len(), 4);
        assert_eq!(engine.frames().len(), 4);
        // Each frame is one segment longer than the previous.
        for (i, frame) in engine.frames().iter().enumerate() {
            assert_eq!(frame.primitives.len(), i + 1);
        }
        // Recorded poses interpolate from the start of the move.
        for (i, frame) in engine.frames().iter().enumerate() {
            assert!((frame.pose.y - 10.0 * i as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_forward_pen_up_emits_nothing() {
        let mut engine = TurtleEngine::new(true);
        engine.pen_up();
        engine.forward(40.0);
        assert!(engine.primitives().is_empty());
        assert!(engine.frames().is_empty());
        assert!((engine.y_cor() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_backward_negates() {
        let mut engine = TurtleEngine::new(false);
        engine.backward(25.0);
        assert!((engine.y_cor() + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_right_left_adjust_heading() {
        let mut engine = TurtleEngine::new(false);
        engine.right(30.0);
        assert_eq!(engine.heading(), 60.0);
        engine.left(30.0);
        assert_eq!(engine.heading(), 90.0);
        // No normalization.
        engine.right(500.0);
        assert_eq!(engine.heading(), -410.0);
    }

    #[test]
    fn test_goto_draws_and_moves() {
        let mut engine = TurtleEngine::new(false);
        engine.goto(30.0, -40.0);
        assert_eq!(engine.primitives().len(), 1);
        assert_eq!(engine.position(), Point::new(30.0, -40.0));
        // Heading untouched.
        assert_eq!(engine.heading(), 90.0);
    }

    #[test]
    fn test_goto_records_one_frame() {
        let mut engine = TurtleEngine::new(true);
        engine.goto(10.0, 10.0);
        assert_eq!(engine.frames().len(), 1);
        engine.pen_up();
        engine.goto(0.0, 0.0);
        assert_eq!(engine.frames().len(), 1);
    }

    #[test]
    fn test_set_x_set_y() {
        let mut engine = TurtleEngine::new(false);
        engine.set_x(15.0);
        engine.set_y(-5.0);
        assert_eq!(engine.position(), Point::new(15.0, -5.0));
        assert_eq!(engine.primitives().len(), 2);
    }

    #[test]
    fn test_home_resets_pose() {
        let mut engine = TurtleEngine::new(false);
        engine.goto(80.0, 20.0);
        engine.right(123.0);
        engine.home();
        assert_eq!(engine.pose(), Pose::home());
    }

    #[test]
    fn test_circle_static_step_count() {
        let mut engine = TurtleEngine::new(false);
        let before = engine.heading();
        engine.circle(50.0, 360.0);
        assert_eq!(engine.primitives().len(), 72);
        // Net rotation is a full turn; heading unchanged modulo 360.
        let delta = (engine.heading() - before).rem_euclid(360.0);
        assert!(delta.abs() < 1e-9 || (delta - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_circle_recording_uses_fixed_steps_and_one_frame() {
        let mut engine = TurtleEngine::new(true);
        engine.circle(50.0, 360.0);
        assert_eq!(engine.primitives().len(), 36);
        assert_eq!(engine.frames().len(), 1);
    }

    #[test]
    fn test_circle_small_extent_at_least_one_step() {
        let mut engine = TurtleEngine::new(false);
        engine.circle(50.0, 2.0);
        assert_eq!(engine.primitives().len(), 1);
    }

    #[test]
    fn test_circle_negative_radius_turns_left() {
        let mut engine = TurtleEngine::new(false);
        engine.circle(-50.0, 90.0);
        assert!(engine.heading() > 90.0);
    }

    #[test]
    fn test_fill_bracket_commits_polygon() {
        let mut engine = TurtleEngine::new(false);
        engine.set_fill_color("red").unwrap();
        engine.begin_fill();
        engine.forward(50.0);
        engine.right(90.0);
        engine.forward(50.0);
        engine.right(90.0);
        engine.forward(50.0);
        engine.end_fill();
        assert_eq!(engine.fills().len(), 1);
        let region = &engine.fills()[0];
        assert_eq!(region.color, Color::new(255, 0, 0));
        assert_eq!(region.points.len(), 4);
    }

    #[test]
    fn test_empty_fill_bracket_commits_nothing() {
        let mut engine = TurtleEngine::new(false);
        engine.begin_fill();
        engine.end_fill();
        assert!(engine.fills().is_empty());
    }

    #[test]
    fn test_fill_bracket_two_points_commits_nothing() {
        let mut engine = TurtleEngine::new(false);
        engine.begin_fill();
        engine.forward(10.0);
        engine.end_fill();
        assert!(engine.fills().is_empty());
        // Bracket state cleared regardless.
        engine.forward(10.0);
        assert!(engine.fills().is_empty());
    }

    #[test]
    fn test_fill_points_follow_pen_up_motion() {
        let mut engine = TurtleEngine::new(false);
        engine.pen_up();
        engine.begin_fill();
        engine.forward(10.0);
        engine.goto(20.0, 20.0);
        engine.forward(5.0);
        engine.end_fill();
        // Pen state gates primitives, not fill accumulation.
        assert!(engine.primitives().is_empty());
        assert_eq!(engine.fills().len(), 1);
    }

    #[test]
    fn test_dot_defaults() {
        let mut engine = TurtleEngine::new(false);
        engine.set_pen_size(3);
        engine.dot(None, None).unwrap();
        match engine.primitives()[0] {
            Primitive::Dot { diameter, color, .. } => {
                assert_eq!(diameter, 7.0);
                assert_eq!(color, Color::BLACK);
            }
            _ => panic!("expected dot"),
        }
    }

    #[test]
    fn test_dot_explicit_size_and_color() {
        let mut engine = TurtleEngine::new(true);
        engine.dot(Some(12.0), Some("blue")).unwrap();
        assert_eq!(engine.frames().len(), 1);
        match engine.primitives()[0] {
            Primitive::Dot { diameter, color, .. } => {
                assert_eq!(diameter, 12.0);
                assert_eq!(color, Color::new(0, 0, 255));
            }
            _ => panic!("expected dot"),
        }
    }

    #[test]
    fn test_dot_unknown_color_fails() {
        let mut engine = TurtleEngine::new(false);
        assert!(engine.dot(None, Some("blurple")).is_err());
        assert!(engine.primitives().is_empty());
    }

    #[test]
    fn test_shape_unknown_ignored() {
        let mut engine = TurtleEngine::new(false);
        engine.set_shape("turtle");
        engine.set_shape("dragon");
        assert_eq!(engine.shape(), TurtleShape::Turtle);
    }

    #[test]
    fn test_distance() {
        let mut engine = TurtleEngine::new(false);
        engine.pen_up();
        engine.goto(3.0, 0.0);
        assert_eq!(engine.distance(0.0, 4.0), 5.0);
    }

    #[test]
    fn test_visibility_toggle() {
        let mut engine = TurtleEngine::new(false);
        engine.hide_turtle();
        assert!(!engine.is_visible());
        engine.show_turtle();
        assert!(engine.is_visible());
    }
}
