//! # TurtleKit Runner
//!
//! The execution driver. Orchestrates one request: construct a fresh
//! engine, execute the script against it, render either the final state or
//! every recorded frame, and shape the uniform response. This is the single
//! place failures become data.

pub mod driver;
pub mod request;

pub use driver::{run_turtle_code, RunOptions};
pub use request::{RunRequest, RunResponse};
