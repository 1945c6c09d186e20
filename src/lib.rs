pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod math;
pub mod render;
pub mod traits;
pub mod types;

pub use camera::{Camera, CameraMode, ModeSwitch, Movement, Orientation};
pub use error::CameraError;
pub use math::{Basis, EulerAngles};
pub use traits::CameraView;
pub use types::CameraUniform;
