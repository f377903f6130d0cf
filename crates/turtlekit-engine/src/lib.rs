//! # TurtleKit Engine
//!
//! The turtle motion and state engine. Maintains the turtle pose, pen
//! attributes, and the append-only lists of drawn primitives and fill
//! regions, and optionally records a timeline of incremental frames for
//! animation playback.
//!
//! One engine instance exists per code-execution request. It is created
//! fresh, driven to completion by the script layer, handed to the renderer,
//! and discarded.

pub mod engine;
pub mod primitives;

pub use engine::{PenState, TurtleEngine, TurtleShape};
pub use primitives::{FillRegion, Frame, Primitive};
