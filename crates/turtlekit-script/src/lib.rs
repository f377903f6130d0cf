//! # TurtleKit Script
//!
//! Lexer, parser, and interpreter for the small Python-subset that
//! introductory turtle lessons are written in. Instead of embedding a
//! general scripting engine, the interpreter executes exactly the turtle
//! verb surface plus a handful of builtins against the engine handle `t`;
//! nothing else is reachable from learner code.

pub mod ast;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod preprocess;

use turtlekit_core::ScriptError;
use turtlekit_engine::TurtleEngine;

pub use interp::Value;

/// Execute learner source against a turtle engine.
///
/// Scrubs compatibility no-ops from the raw text, then lexes, parses, and
/// interprets it. The engine is mutated in place; any failure leaves the
/// engine in whatever state it had reached, which the driver discards.
pub fn run_script(source: &str, engine: &mut TurtleEngine) -> Result<(), ScriptError> {
    let cleaned = preprocess::scrub_source(source);
    let tokens = lexer::tokenize(&cleaned)?;
    let program = parser::parse(&tokens)?;
    interp::Interpreter::new(engine).run(&program)
}
