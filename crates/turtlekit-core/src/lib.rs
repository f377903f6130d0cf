//! # TurtleKit Core
//!
//! Core types, traits, and utilities for TurtleKit.
//! Provides the fundamental abstractions shared by the motion engine,
//! the script layer, and the frame renderer.

pub mod color;
pub mod constants;
pub mod error;
pub mod geometry;

pub use color::Color;
pub use error::{EngineError, Error, RenderError, Result, ScriptError};
pub use geometry::{Point, Pose};
