//! Shared constants for simulation and rendering

/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 600;
/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

/// Number of sub-steps a single `forward` move is split into while
/// frame recording is active
pub const FORWARD_ANIMATION_STEPS: u32 = 4;

/// Fixed number of chord steps for `circle` while frame recording is active
pub const CIRCLE_ANIMATION_STEPS: u32 = 36;
/// Degrees of arc covered by one chord step in static mode
pub const CIRCLE_DEGREES_PER_STEP: f64 = 5.0;

/// Heading after `home` / at engine construction (degrees, 90 = up)
pub const HOME_HEADING: f64 = 90.0;

/// Stroke width for line primitives, in pixels
pub const LINE_STROKE_WIDTH: f32 = 2.0;
/// Opacity applied to fill regions (lines stay fully opaque on top)
pub const FILL_OPACITY: f32 = 0.7;
/// Scale applied to the turtle glyph asset when composited
pub const GLYPH_SCALE: f32 = 0.15;
