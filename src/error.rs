use glam::Vec3;
use thiserror::Error;

use crate::camera::CameraMode;

/// Rejected camera input. Every mutating camera operation validates before it
/// touches state, so an `Err` leaves the camera exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("rotation axis must be non-zero and finite, got {0}")]
    InvalidAxis(Vec3),

    #[error("look-at target {0} coincides with the camera position")]
    DegenerateTarget(Vec3),

    #[error("view direction {0} is parallel to world up, camera basis is undefined")]
    DegenerateBasis(Vec3),

    #[error("world up must be finite and point along +Y, got {0}")]
    InvalidWorldUp(Vec3),

    #[error("{operation} needs {required} mode but the camera is in {current} mode")]
    ModeMismatch {
        operation: &'static str,
        required: CameraMode,
        current: CameraMode,
    },

    #[error("non-finite value passed to {0}")]
    NonFinite(&'static str),

    #[error("invalid camera setting: {0}")]
    InvalidSetting(String),
}
