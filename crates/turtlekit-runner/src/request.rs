//! Request and response shapes for one execution
//!
//! Mirrors the transport contract: the caller posts a script plus optional
//! canvas dimensions and an animation flag, and receives either one image,
//! an ordered frame list, or an error message.

use serde::{Deserialize, Serialize};

/// One code-execution request
#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    /// The learner's script text
    pub code: String,
    /// Canvas width in pixels; falls back to the configured default
    #[serde(default)]
    pub width: Option<u32>,
    /// Canvas height in pixels; falls back to the configured default
    #[serde(default)]
    pub height: Option<u32>,
    /// Record and render the animation timeline instead of one final image
    #[serde(default)]
    pub animate: bool,
}

impl RunRequest {
    /// A static-mode request with default dimensions
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            width: None,
            height: None,
            animate: false,
        }
    }

    /// Same request with animation enabled
    pub fn animated(code: impl Into<String>) -> Self {
        Self {
            animate: true,
            ..Self::new(code)
        }
    }
}

/// The uniform execution response
///
/// Exactly one of the three shapes goes over the wire:
/// `{success: true, image}`, `{success: true, frames, frame_count}`, or
/// `{success: false, error}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RunResponse {
    Static {
        success: bool,
        /// PNG data URI of the final state
        image: String,
    },
    Animation {
        success: bool,
        /// PNG data URIs, one per recorded frame, in timeline order
        frames: Vec<String>,
        frame_count: usize,
    },
    Failure {
        success: bool,
        /// Human-readable message; no partial output accompanies it
        error: String,
    },
}

impl RunResponse {
    pub fn static_image(image: String) -> Self {
        RunResponse::Static {
            success: true,
            image,
        }
    }

    pub fn animation(frames: Vec<String>) -> Self {
        let frame_count = frames.len();
        RunResponse::Animation {
            success: true,
            frames,
            frame_count,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        RunResponse::Failure {
            success: false,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, RunResponse::Failure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: RunRequest = serde_json::from_str(r#"{"code": "t.forward(10)"}"#).unwrap();
        assert_eq!(request.code, "t.forward(10)");
        assert_eq!(request.width, None);
        assert_eq!(request.height, None);
        assert!(!request.animate);
    }

    #[test]
    fn test_request_full() {
        let request: RunRequest = serde_json::from_str(
            r#"{"code": "t.home()", "width": 800, "height": 400, "animate": true}"#,
        )
        .unwrap();
        assert_eq!(request.width, Some(800));
        assert_eq!(request.height, Some(400));
        assert!(request.animate);
    }

    #[test]
    fn test_request_without_code_rejected() {
        assert!(serde_json::from_str::<RunRequest>(r#"{"width": 800}"#).is_err());
    }

    #[test]
    fn test_static_response_shape() {
        let json =
            serde_json::to_value(RunResponse::static_image("data:image/png;base64,AA".into()))
                .unwrap();
        assert_eq!(json["success"], true);
        assert!(json["image"].is_string());
        assert!(json.get("frames").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_animation_response_shape() {
        let json = serde_json::to_value(RunResponse::animation(vec![
            "a".to_string(),
            "b".to_string(),
        ]))
        .unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["frame_count"], 2);
        assert_eq!(json["frames"].as_array().unwrap().len(), 2);
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_failure_response_shape() {
        let json = serde_json::to_value(RunResponse::failure("boom")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
        assert!(json.get("image").is_none());
    }
}
