use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{
    Camera, CameraMode, DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED, DEFAULT_YAW, FOV_MAX,
    FOV_MIN,
};
use crate::error::CameraError;

/// Degrees per second applied by the arrow and Q/E keys
pub const DEFAULT_ROTATION_SPEED: f32 = 60.0;
/// Turn applied by one press of a rotation step key
pub const DEFAULT_STEP_DEGREES: f32 = 15.0;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
}

impl AppConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(text)?;
        config.camera.validate()?;
        config.window.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Camera Lab".to_string(),
            width: 1600,
            height: 1200,
        }
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<(), CameraError> {
        if self.width == 0 || self.height == 0 {
            return Err(CameraError::InvalidSetting(format!(
                "window size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Initial camera state and control tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub world_up: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub mode: CameraMode,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub fov: f32,
    pub constrain_pitch: bool,
    pub rotation_speed: f32,
    pub look_target: [f32; 3],
    /// Yaw, pitch and roll composed on world axes by the world-axes preset
    pub preset_angles: [f32; 3],
    /// Axis shared by the axis-angle preset and the rotation steps
    pub step_axis: [f32; 3],
    pub axis_angle_degrees: f32,
    pub step_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 3.0],
            world_up: [0.0, 1.0, 0.0],
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            mode: CameraMode::Euler,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            fov: FOV_MAX,
            constrain_pitch: true,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            look_target: [0.0, 0.0, 0.0],
            preset_angles: [0.0, 90.0, 0.0],
            step_axis: [1.0, 0.0, 0.0],
            axis_angle_degrees: 45.0,
            step_degrees: DEFAULT_STEP_DEGREES,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), CameraError> {
        let positive = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(CameraError::InvalidSetting(format!(
                    "{} must be positive, got {}",
                    name, value
                )))
            }
        };
        positive("movement_speed", self.movement_speed)?;
        positive("mouse_sensitivity", self.mouse_sensitivity)?;
        positive("rotation_speed", self.rotation_speed)?;

        if !(FOV_MIN..=FOV_MAX).contains(&self.fov) {
            return Err(CameraError::InvalidSetting(format!(
                "fov must be within [{}, {}], got {}",
                FOV_MIN, FOV_MAX, self.fov
            )));
        }
        if !Vec3::from_array(self.look_target).is_finite() {
            return Err(CameraError::NonFinite("look_target"));
        }
        if !Vec3::from_array(self.preset_angles).is_finite() {
            return Err(CameraError::NonFinite("preset_angles"));
        }
        let axis = self.step_axis();
        if !axis.is_finite() || axis.length_squared() < 1e-12 {
            return Err(CameraError::InvalidAxis(axis));
        }
        if !self.axis_angle_degrees.is_finite() || !self.step_degrees.is_finite() {
            return Err(CameraError::NonFinite("step angles"));
        }
        Ok(())
    }

    pub fn look_target(&self) -> Vec3 {
        Vec3::from_array(self.look_target)
    }

    pub fn step_axis(&self) -> Vec3 {
        Vec3::from_array(self.step_axis)
    }

    /// Validate and construct the camera this config describes
    pub fn build(&self) -> Result<Camera, CameraError> {
        self.validate()?;
        let camera = Camera::new(
            Vec3::from_array(self.position),
            Vec3::from_array(self.world_up),
            self.yaw,
            self.pitch,
            self.mode,
        )?;
        Ok(camera
            .with_movement_speed(self.movement_speed)
            .with_mouse_sensitivity(self.mouse_sensitivity)
            .with_fov(self.fov))
    }
}
