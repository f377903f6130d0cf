//! Snapshot rasterization
//!
//! Maps the symmetric world window `[-w/2, w/2] x [-h/2, h/2]` onto a
//! `w x h` raster with the y-axis up and no axes or frame chrome, then
//! draws back to front: fill regions, primitives, turtle glyph.

use std::path::Path;
use tiny_skia::{FillRule, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::debug;

use turtlekit_core::constants::{FILL_OPACITY, LINE_STROKE_WIDTH};
use turtlekit_core::{Color, Pose, RenderError};
use turtlekit_engine::{FillRegion, Frame, Primitive};

use crate::encode::pixmap_to_data_uri;
use crate::glyph::TurtleGlyph;

fn paint_for(color: Color, alpha: f32) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(tiny_skia::Color::from_rgba8(
        color.r,
        color.g,
        color.b,
        (alpha * 255.0) as u8,
    ));
    paint.anti_alias = true;
    paint
}

/// One renderable moment: everything drawn so far plus an optional pose
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub primitives: &'a [Primitive],
    pub fills: &'a [FillRegion],
    /// Draw the turtle glyph here, when present
    pub pose: Option<Pose>,
}

impl<'a> Snapshot<'a> {
    pub fn new(primitives: &'a [Primitive], fills: &'a [FillRegion], pose: Option<Pose>) -> Self {
        Self {
            primitives,
            fills,
            pose,
        }
    }

    /// View a recorded animation frame as a snapshot
    pub fn from_frame(frame: &'a Frame) -> Self {
        Self {
            primitives: &frame.primitives,
            fills: &frame.fills,
            pose: Some(frame.pose),
        }
    }
}

/// Rasterizes snapshots at fixed pixel dimensions
///
/// The renderer itself is immutable and holds no canvas state; each call to
/// [`FrameRenderer::render`] allocates and drops its own pixmap.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    width: u32,
    height: u32,
    glyph: TurtleGlyph,
}

impl FrameRenderer {
    /// Create a renderer for the given canvas size with the built-in glyph
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            glyph: TurtleGlyph::Builtin,
        })
    }

    /// Use a glyph asset, degrading to the built-in glyph if unavailable
    pub fn with_glyph_path(mut self, path: Option<&Path>) -> Self {
        self.glyph = TurtleGlyph::load(path);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// World -> screen: y flips, origin moves to the canvas center
    fn world_transform(&self) -> Transform {
        Transform::from_scale(1.0, -1.0)
            .post_translate(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    fn screen_point(&self, x: f64, y: f64) -> (f32, f32) {
        (
            x as f32 + self.width as f32 / 2.0,
            self.height as f32 / 2.0 - y as f32,
        )
    }

    /// Rasterize one snapshot and encode it as a PNG data URI
    pub fn render(&self, snapshot: &Snapshot<'_>) -> Result<String, RenderError> {
        let mut pixmap =
            Pixmap::new(self.width, self.height).ok_or(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        let transform = self.world_transform();

        self.draw_fills(&mut pixmap, snapshot.fills, transform);
        self.draw_primitives(&mut pixmap, snapshot.primitives, transform);

        if let Some(pose) = snapshot.pose {
            let (sx, sy) = self.screen_point(pose.x, pose.y);
            self.glyph.draw(&mut pixmap, sx, sy, pose);
        }

        debug!(
            primitives = snapshot.primitives.len(),
            fills = snapshot.fills.len(),
            "rendered snapshot"
        );
        pixmap_to_data_uri(&pixmap)
    }

    /// Rasterize a recorded animation frame
    pub fn render_frame(&self, frame: &Frame) -> Result<String, RenderError> {
        self.render(&Snapshot::from_frame(frame))
    }

    fn draw_fills(&self, pixmap: &mut Pixmap, fills: &[FillRegion], transform: Transform) {
        for region in fills {
            if region.points.len() < 3 {
                continue;
            }
            let mut pb = PathBuilder::new();
            pb.move_to(region.points[0].x as f32, region.points[0].y as f32);
            for point in &region.points[1..] {
                pb.line_to(point.x as f32, point.y as f32);
            }
            pb.close();
            if let Some(path) = pb.finish() {
                let paint = paint_for(region.color, FILL_OPACITY);
                pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
            }
        }
    }

    fn draw_primitives(&self, pixmap: &mut Pixmap, primitives: &[Primitive], transform: Transform) {
        let stroke = Stroke {
            width: LINE_STROKE_WIDTH,
            line_cap: LineCap::Round,
            ..Default::default()
        };

        for primitive in primitives {
            match primitive {
                Primitive::Segment { from, to, color } => {
                    let mut pb = PathBuilder::new();
                    pb.move_to(from.x as f32, from.y as f32);
                    pb.line_to(to.x as f32, to.y as f32);
                    if let Some(path) = pb.finish() {
                        let paint = paint_for(*color, 1.0);
                        pixmap.stroke_path(&path, &paint, &stroke, transform, None);
                    }
                }
                Primitive::Dot {
                    at,
                    color,
                    diameter,
                } => {
                    let radius = (*diameter as f32 / 2.0).max(0.5);
                    if let Some(path) = PathBuilder::from_circle(at.x as f32, at.y as f32, radius)
                    {
                        let paint = paint_for(*color, 1.0);
                        pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
                    }
                }
            }
        }
    }
}
