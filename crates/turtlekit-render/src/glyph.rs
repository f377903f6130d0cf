//! The turtle glyph drawn at the final pose
//!
//! Prefers a PNG asset when one is configured and decodable; otherwise a
//! built-in arrowhead is drawn with the same placement and rotation. Asset
//! problems degrade, they never fail a render.

use std::path::Path;
use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Transform,
};
use tracing::warn;

use turtlekit_core::constants::GLYPH_SCALE;
use turtlekit_core::Pose;

/// Half-height of the built-in arrowhead, in pixels
const BUILTIN_SIZE: f32 = 10.0;

fn builtin_color() -> Color {
    Color::from_rgba8(34, 139, 34, 255)
}

/// The glyph marking the turtle's position and heading
#[derive(Clone)]
pub enum TurtleGlyph {
    /// Decoded PNG asset, composited with scaling and rotation
    Asset(Pixmap),
    /// Drawn arrowhead used when no asset is available
    Builtin,
}

impl std::fmt::Debug for TurtleGlyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurtleGlyph::Asset(pixmap) => f
                .debug_struct("Asset")
                .field("width", &pixmap.width())
                .field("height", &pixmap.height())
                .finish(),
            TurtleGlyph::Builtin => write!(f, "Builtin"),
        }
    }
}

impl TurtleGlyph {
    /// Load the glyph asset, falling back to the built-in arrowhead.
    ///
    /// A missing or undecodable file logs a warning and degrades; the
    /// caller never sees an error.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return TurtleGlyph::Builtin;
        };
        match std::fs::read(path).ok().and_then(|bytes| Pixmap::decode_png(&bytes).ok()) {
            Some(pixmap) => TurtleGlyph::Asset(pixmap),
            None => {
                warn!(path = %path.display(), "turtle glyph asset unavailable, using built-in glyph");
                TurtleGlyph::Builtin
            }
        }
    }

    /// Composite the glyph onto `canvas` at the given pose.
    ///
    /// `sx`/`sy` are screen coordinates (y down). The glyph art points up,
    /// which corresponds to heading 90, so the screen rotation is
    /// `90 - heading` degrees clockwise.
    pub fn draw(&self, canvas: &mut Pixmap, sx: f32, sy: f32, pose: Pose) {
        let rotation = Transform::from_rotate_at((90.0 - pose.heading) as f32, sx, sy);

        match self {
            TurtleGlyph::Asset(asset) => {
                let gw = asset.width() as f32 * GLYPH_SCALE;
                let gh = asset.height() as f32 * GLYPH_SCALE;
                let placement = Transform::from_scale(GLYPH_SCALE, GLYPH_SCALE)
                    .post_translate(sx - gw / 2.0, sy - gh / 2.0)
                    .post_concat(rotation);
                canvas.draw_pixmap(
                    0,
                    0,
                    asset.as_ref(),
                    &PixmapPaint::default(),
                    placement,
                    None,
                );
            }
            TurtleGlyph::Builtin => {
                let mut pb = PathBuilder::new();
                pb.move_to(sx, sy - BUILTIN_SIZE);
                pb.line_to(sx + 0.7 * BUILTIN_SIZE, sy + BUILTIN_SIZE);
                pb.line_to(sx, sy + 0.4 * BUILTIN_SIZE);
                pb.line_to(sx - 0.7 * BUILTIN_SIZE, sy + BUILTIN_SIZE);
                pb.close();
                let Some(path) = pb.finish() else {
                    return;
                };
                let mut paint = Paint::default();
                paint.set_color(builtin_color());
                paint.anti_alias = true;
                canvas.fill_path(&path, &paint, FillRule::Winding, rotation, None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset_degrades() {
        let glyph = TurtleGlyph::load(Some(Path::new("/nonexistent/turtle.png")));
        assert!(matches!(glyph, TurtleGlyph::Builtin));
    }

    #[test]
    fn test_no_path_uses_builtin() {
        assert!(matches!(TurtleGlyph::load(None), TurtleGlyph::Builtin));
    }

    #[test]
    fn test_builtin_draw_marks_canvas() {
        let mut canvas = Pixmap::new(60, 60).unwrap();
        canvas.fill(Color::WHITE);
        let before = canvas.data().to_vec();
        TurtleGlyph::Builtin.draw(&mut canvas, 30.0, 30.0, Pose::home());
        assert_ne!(before, canvas.data());
    }

    #[test]
    fn test_corrupt_asset_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turtle.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(matches!(
            TurtleGlyph::load(Some(&path)),
            TurtleGlyph::Builtin
        ));
    }
}
