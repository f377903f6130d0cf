//! # TurtleKit Render
//!
//! Converts a drawing snapshot (primitives, fill regions, and an optional
//! turtle pose) into one PNG image wrapped as a base64 data URI.
//!
//! Every render owns its pixmap for the whole call and drops it on every
//! exit path, so concurrent requests can rasterize independently; there is
//! no process-wide canvas state to serialize.

pub mod encode;
pub mod glyph;
pub mod renderer;

pub use glyph::TurtleGlyph;
pub use renderer::{FrameRenderer, Snapshot};
