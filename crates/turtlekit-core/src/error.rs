//! Error handling for TurtleKit
//!
//! Provides error types for all layers of the simulation core:
//! - Engine errors (command evaluation against the motion engine)
//! - Script errors (lexing, parsing, interpreting learner source)
//! - Render errors (rasterization and encoding)
//!
//! All error types use `thiserror`. The driver is the single place where a
//! failure is converted into the uniform response shape; nothing below it
//! retries or swallows.

use thiserror::Error;

/// Motion engine error type
///
/// The engine performs no up-front validation of a script; these surface at
/// the point a faulty operation is first evaluated.
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    /// A color word that no palette entry or hex form matches
    #[error("unknown color: '{name}'")]
    UnknownColor {
        /// The color word as it appeared in the script.
        name: String,
    },

    /// Generic engine error
    #[error("turtle error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Script execution error type
///
/// Covers the whole path from source text to executed commands. Messages are
/// worded the way a learner would see them from a Python interpreter, since
/// they are surfaced verbatim in the response.
#[derive(Error, Debug, Clone)]
pub enum ScriptError {
    /// Source could not be tokenized or parsed
    #[error("syntax error at line {line}: {reason}")]
    Syntax {
        /// 1-based source line of the offending token.
        line: usize,
        /// What the parser expected or found.
        reason: String,
    },

    /// A bare name that is not bound in the execution namespace
    #[error("name '{name}' is not defined")]
    UndefinedName {
        /// The unresolved name.
        name: String,
    },

    /// An attribute access on the turtle handle outside the verb surface
    #[error("turtle has no attribute '{name}'")]
    UnknownAttribute {
        /// The attribute that was accessed.
        name: String,
    },

    /// A call with the wrong number or kind of arguments
    #[error("{verb}(): {reason}")]
    BadArgument {
        /// The callable being invoked.
        verb: String,
        /// Why the arguments were rejected.
        reason: String,
    },

    /// An operator applied to operand types it does not support
    #[error("unsupported operand type(s) for {op}")]
    BadOperand {
        /// The operator symbol.
        op: String,
    },

    /// Division or modulo by zero
    #[error("division by zero")]
    DivisionByZero,

    /// A value used where an iterable was required
    #[error("'{what}' object is not iterable")]
    NotIterable {
        /// Description of the non-iterable value.
        what: String,
    },

    /// The defensive loop-iteration ceiling was hit
    #[error("script exceeded {limit} loop iterations")]
    IterationLimit {
        /// The configured ceiling.
        limit: u64,
    },

    /// A value could not be converted (e.g. `int("abc")`)
    #[error("invalid literal for {target}(): '{value}'")]
    BadConversion {
        /// The conversion target type name.
        target: String,
        /// The literal that failed to convert.
        value: String,
    },

    /// Engine-level failure raised by a verb
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Renderer error type
///
/// Raised when a snapshot cannot be rasterized or encoded. Missing glyph
/// assets are not errors; the renderer degrades to a drawn glyph instead.
#[derive(Error, Debug, Clone)]
pub enum RenderError {
    /// Canvas dimensions the raster backend cannot allocate
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// PNG encoding failed
    #[error("failed to encode image: {reason}")]
    Encode {
        /// The underlying encoder message.
        reason: String,
    },

    /// Generic renderer error
    #[error("render error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for TurtleKit
///
/// A unified error type that can represent any failure from the simulation
/// core. This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Engine error
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Script error
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// Render error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a script error
    pub fn is_script_error(&self) -> bool {
        matches!(self, Error::Script(_))
    }

    /// Check if this is a render error
    pub fn is_render_error(&self) -> bool {
        matches!(self, Error::Render(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_error_display() {
        let err = ScriptError::UndefinedName {
            name: "shape".to_string(),
        };
        assert_eq!(err.to_string(), "name 'shape' is not defined");

        let err = ScriptError::UnknownAttribute {
            name: "teleport".to_string(),
        };
        assert_eq!(err.to_string(), "turtle has no attribute 'teleport'");

        let err = ScriptError::Syntax {
            line: 3,
            reason: "expected ')'".to_string(),
        };
        assert_eq!(err.to_string(), "syntax error at line 3: expected ')'");
    }

    #[test]
    fn test_render_error_display() {
        let err = RenderError::InvalidDimensions {
            width: 0,
            height: 600,
        };
        assert_eq!(err.to_string(), "invalid canvas dimensions 0x600");
    }

    #[test]
    fn test_error_conversion() {
        let engine_err = EngineError::UnknownColor {
            name: "blurple".to_string(),
        };
        let script_err: ScriptError = engine_err.into();
        assert!(matches!(script_err, ScriptError::Engine(_)));
        assert_eq!(script_err.to_string(), "unknown color: 'blurple'");

        let err: Error = script_err.into();
        assert!(err.is_script_error());
    }
}
