use glam::{Mat4, Vec3};

use crate::camera::{FAR_PLANE, NEAR_PLANE};

/// What a renderer needs from a camera
pub trait CameraView {
    /// World-to-camera transform
    fn view_matrix(&self) -> Mat4;

    /// Camera position in world space
    fn position(&self) -> Vec3;

    /// Unit view direction in world space
    fn forward(&self) -> Vec3;

    /// Vertical field of view in degrees
    fn fov_degrees(&self) -> f32;

    /// Right-handed perspective projection for the given aspect ratio
    fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees().to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}
