use crate::camera::{Camera, CameraMode};

/// Camera uniform buffer data for GPU
///
/// Layout matches the `Camera` struct in `sky.wgsl`: each vec3 takes a
/// 16-byte slot and the scalars fill the trailing slot.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub position: [f32; 3],
    pub _pad1: f32,
    pub forward: [f32; 3],
    pub _pad2: f32,
    pub right: [f32; 3],
    pub _pad3: f32,
    pub up: [f32; 3],
    pub tan_half_fov: f32,
    pub aspect: f32,
    pub mode: f32, // 0.0 euler, 1.0 quaternion
    pub _pad4: [f32; 2],
}

impl CameraUniform {
    pub fn new(camera: &Camera, aspect: f32) -> Self {
        let basis = camera.basis();
        Self {
            position: camera.position.to_array(),
            _pad1: 0.0,
            forward: basis.front.to_array(),
            _pad2: 0.0,
            right: basis.right.to_array(),
            _pad3: 0.0,
            up: basis.up.to_array(),
            tan_half_fov: (camera.fov().to_radians() * 0.5).tan(),
            aspect,
            mode: match camera.mode() {
                CameraMode::Euler => 0.0,
                CameraMode::Quaternion => 1.0,
            },
            _pad4: [0.0; 2],
        }
    }
}
