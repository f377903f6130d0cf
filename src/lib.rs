//! # TurtleKit
//!
//! Turtle-graphics simulation and rendering backend for an educational
//! Python-learning platform.
//!
//! ## Architecture
//!
//! TurtleKit is organized as a workspace with one crate per concern:
//!
//! 1. **turtlekit-core** - Shared geometry/color types and the error taxonomy
//! 2. **turtlekit-engine** - Turtle pose, pen state, primitives, animation timeline
//! 3. **turtlekit-script** - Lexer, parser, and interpreter for learner scripts
//! 4. **turtlekit-render** - Snapshot rasterization to base64 PNG data URIs
//! 5. **turtlekit-settings** - TOML configuration
//! 6. **turtlekit-runner** - The execution driver tying a request together
//! 7. **turtlekit** - This binary: JSON request in, JSON response out
//!
//! One request is one fresh engine, one script execution, and one render
//! pass; nothing is shared between requests.

pub use turtlekit_runner::{run_turtle_code, RunOptions, RunRequest, RunResponse};
pub use turtlekit_settings::Config;

/// Initialize logging for the process.
///
/// `RUST_LOG` wins when set; otherwise the configured filter applies.
pub fn init_logging(filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    Ok(())
}

/// Build driver options from loaded configuration
pub fn run_options(config: &Config) -> RunOptions {
    RunOptions {
        default_width: config.render.default_width,
        default_height: config.render.default_height,
        glyph_path: config.render.glyph_path.clone(),
    }
}
