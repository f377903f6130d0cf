//! Drawable primitives and animation frames
//!
//! Primitives are append-only: once the engine records one it is never
//! mutated, truncated, or reordered. A frame is a full snapshot of
//! everything drawn so far plus the turtle pose at the moment of capture.

use serde::{Deserialize, Serialize};
use turtlekit_core::{Color, Point, Pose};

/// One atomic drawable unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// A stroked line segment between two points
    Segment {
        from: Point,
        to: Point,
        color: Color,
    },
    /// A round marker left by the `dot` verb
    Dot {
        at: Point,
        color: Color,
        diameter: f64,
    },
}

impl Primitive {
    /// The color the primitive is drawn with
    pub fn color(&self) -> Color {
        match self {
            Primitive::Segment { color, .. } | Primitive::Dot { color, .. } => *color,
        }
    }
}

/// A closed polygon accumulated between `begin_fill` and `end_fill`
///
/// Only ever constructed with more than two points; a bracket that closes
/// earlier contributes nothing. Fill regions render beneath all segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillRegion {
    pub points: Vec<Point>,
    pub color: Color,
}

/// An immutable snapshot of the drawing at one moment of the command trace
///
/// Produced only while frame recording is enabled. The ordered frame list
/// is the animation timeline; it is never mutated after capture, only
/// consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub primitives: Vec<Primitive>,
    pub fills: Vec<FillRegion>,
    /// Turtle pose at capture time
    pub pose: Pose,
}
