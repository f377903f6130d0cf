//! One-request orchestration
//!
//! A request is self-contained: fresh engine, one script execution, one
//! render pass, nothing shared with any other request. Render resources
//! are owned by the render call and released on every exit path, including
//! failures, so no figure/canvas state can bleed into the next request.

use std::path::PathBuf;
use tracing::{debug, warn};

use turtlekit_core::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use turtlekit_core::Result;
use turtlekit_engine::TurtleEngine;
use turtlekit_render::{FrameRenderer, Snapshot};
use turtlekit_script::run_script;

use crate::request::{RunRequest, RunResponse};

/// Driver-level options supplied by the host, not the request
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Canvas width applied when the request leaves it unset
    pub default_width: u32,
    /// Canvas height applied when the request leaves it unset
    pub default_height: u32,
    /// Turtle glyph asset; `None` or an unreadable path degrades to the
    /// built-in glyph
    pub glyph_path: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_CANVAS_WIDTH,
            default_height: DEFAULT_CANVAS_HEIGHT,
            glyph_path: None,
        }
    }
}

/// Execute one request end to end.
///
/// Never panics and never returns an error: every failure is folded into
/// the `{success: false, error}` response shape here, with no partial
/// rendering.
pub fn run_turtle_code(request: &RunRequest, options: &RunOptions) -> RunResponse {
    match execute(request, options) {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "execution failed");
            RunResponse::failure(err.to_string())
        }
    }
}

fn execute(request: &RunRequest, options: &RunOptions) -> Result<RunResponse> {
    let width = request.width.unwrap_or(options.default_width);
    let height = request.height.unwrap_or(options.default_height);
    let renderer =
        FrameRenderer::new(width, height)?.with_glyph_path(options.glyph_path.as_deref());

    let mut engine = TurtleEngine::new(request.animate);
    run_script(&request.code, &mut engine)?;

    // Animation mode with a recorded timeline renders every frame; a run
    // that recorded nothing (no commit events) falls back to one image.
    if request.animate && !engine.frames().is_empty() {
        let mut frames = Vec::with_capacity(engine.frames().len());
        for frame in engine.frames() {
            frames.push(renderer.render_frame(frame)?);
        }
        debug!(frame_count = frames.len(), "rendered animation timeline");
        return Ok(RunResponse::animation(frames));
    }

    let pose = engine.is_visible().then(|| engine.pose());
    let snapshot = Snapshot::new(engine.primitives(), engine.fills(), pose);
    let image = renderer.render(&snapshot)?;
    Ok(RunResponse::static_image(image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_success() {
        let response = run_turtle_code(&RunRequest::new("t.forward(40)"), &RunOptions::default());
        assert!(response.is_success());
        assert!(matches!(response, RunResponse::Static { .. }));
    }

    #[test]
    fn test_failure_is_data_not_error() {
        let response = run_turtle_code(
            &RunRequest::new("t.launch_rocket()"),
            &RunOptions::default(),
        );
        match response {
            RunResponse::Failure { success, error } => {
                assert!(!success);
                assert!(!error.is_empty());
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_request_dimensions_override_defaults() {
        let mut request = RunRequest::new("t.forward(10)");
        request.width = Some(0);
        let response = run_turtle_code(&request, &RunOptions::default());
        match response {
            RunResponse::Failure { error, .. } => assert!(error.contains("dimensions")),
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
