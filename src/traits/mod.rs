pub mod camera;

pub use camera::CameraView;
