use std::fmt;

use crate::camera::{Camera, CameraMode, ModeSwitch};
use crate::config::CameraConfig;
use crate::error::CameraError;

use super::frame_input::{EdgeTrigger, FrameInput};

/// One-press quaternion operations bound to the number keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Preset angles composed about world axes
    WorldAxes,
    /// Absolute turn about the step axis
    AxisAngle,
    /// Step about the fixed world axis, `delta * q`
    WorldStep,
    /// Step about the same axis carried by the camera, `q * delta`
    LocalStep,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::WorldAxes,
        Preset::AxisAngle,
        Preset::WorldStep,
        Preset::LocalStep,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::WorldAxes => "world-axes preset",
            Preset::AxisAngle => "axis-angle preset",
            Preset::WorldStep => "world step",
            Preset::LocalStep => "local step",
        }
    }

    fn is_pressed(self, input: &FrameInput) -> bool {
        match self {
            Preset::WorldAxes => input.world_axes_preset,
            Preset::AxisAngle => input.axis_angle_preset,
            Preset::WorldStep => input.world_step,
            Preset::LocalStep => input.local_step,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an update did besides moving and turning the camera
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameEvents {
    pub reset: bool,
    pub mode_switch: Option<ModeSwitch>,
    pub looked_at_target: bool,
    /// New capture state when it changed this frame
    pub capture_changed: Option<bool>,
    /// Last number-key operation applied this frame
    pub preset: Option<Preset>,
}

/// Owns the camera and applies one frame of input to it.
///
/// Within a frame the order is fixed: reset, capture toggle, movement,
/// orientation (mode toggle, look-at, presets, keyboard rotation, mouse
/// look), then zoom. The frame that turns capture on ignores mouse look and
/// zoom, since that movement happened before the cursor was grabbed.
#[derive(Debug, Clone)]
pub struct CameraRig {
    camera: Camera,
    config: CameraConfig,
    captured: bool,
    reset_trigger: EdgeTrigger,
    mode_trigger: EdgeTrigger,
    look_trigger: EdgeTrigger,
    capture_trigger: EdgeTrigger,
    preset_triggers: [EdgeTrigger; 4],
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        Ok(Self {
            camera: config.build()?,
            config,
            captured: false,
            reset_trigger: EdgeTrigger::new(),
            mode_trigger: EdgeTrigger::new(),
            look_trigger: EdgeTrigger::new(),
            capture_trigger: EdgeTrigger::new(),
            preset_triggers: [EdgeTrigger::new(); 4],
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Mouse look and wheel zoom only apply while captured
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    /// Rebuild the camera from its config, keeping the current mode
    pub fn reset(&mut self) -> Result<(), CameraError> {
        let mode = self.camera.mode();
        let mut camera = self.config.build()?;
        camera.set_mode(mode);
        self.camera = camera;
        log::info!("camera reset ({} mode)", mode);
        Ok(())
    }

    pub fn update(&mut self, input: &FrameInput, delta_time: f32) -> Result<FrameEvents, CameraError> {
        let mut events = FrameEvents::default();

        if self.reset_trigger.rising(input.reset) {
            self.reset()?;
            events.reset = true;
        }
        if self.capture_trigger.rising(input.toggle_capture) {
            self.captured = !self.captured;
            events.capture_changed = Some(self.captured);
        }

        let capture_started = events.capture_changed == Some(true);

        for &movement in &input.movement {
            self.camera.process_movement(movement, delta_time);
        }

        if self.mode_trigger.rising(input.toggle_mode) {
            let mode = self.camera.mode().toggled();
            events.mode_switch = Some(self.camera.set_mode(mode));
        }

        if self.look_trigger.rising(input.look_at_target) {
            match self.camera.look_at(self.config.look_target()) {
                Ok(()) => events.looked_at_target = true,
                Err(err) => log::warn!("look-at skipped: {}", err),
            }
        }

        for (i, preset) in Preset::ALL.into_iter().enumerate() {
            if self.preset_triggers[i].rising(preset.is_pressed(input)) {
                match self.apply_preset(preset) {
                    Ok(()) => events.preset = Some(preset),
                    Err(err @ CameraError::ModeMismatch { .. }) => {
                        log::warn!("{} skipped: {}", preset, err);
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        if input.is_rotating() {
            self.rotate_by_keys(input.rotation, delta_time)?;
        }

        if self.captured && !capture_started {
            let (dx, dy) = input.look_delta;
            if dx != 0.0 || dy != 0.0 {
                self.camera
                    .process_look_delta(dx, dy, self.config.constrain_pitch);
            }
            if input.scroll_delta != 0.0 {
                self.camera.process_zoom(input.scroll_delta);
            }
        }

        log::trace!(
            "frame dt={:.4} pos={} front={}",
            delta_time,
            self.camera.position,
            self.camera.front()
        );
        Ok(events)
    }

    fn apply_preset(&mut self, preset: Preset) -> Result<(), CameraError> {
        let axis = self.config.step_axis();
        let step = self.config.step_degrees;
        match preset {
            Preset::WorldAxes => {
                let [yaw, pitch, roll] = self.config.preset_angles;
                self.camera.set_quaternion_from_euler(yaw, pitch, roll)
            }
            Preset::AxisAngle => self
                .camera
                .set_from_axis_angle(axis, self.config.axis_angle_degrees),
            Preset::WorldStep => self.camera.apply_incremental_rotation(axis, step),
            Preset::LocalStep => {
                let basis = self.camera.basis();
                let local = basis.right * axis.x + basis.up * axis.y - basis.front * axis.z;
                self.camera.apply_incremental_rotation(local, step)
            }
        }
    }

    /// Keyboard rotation. Euler mode adds to the angles without a pitch
    /// clamp, so holding pitch past 90 shows gimbal lock; quaternion mode
    /// turns about the live local axes.
    fn rotate_by_keys(&mut self, rotation: [f32; 3], delta_time: f32) -> Result<(), CameraError> {
        let step = self.config.rotation_speed * delta_time;
        let [yaw, pitch, roll] = rotation.map(|axis| axis * step);

        match self.camera.mode() {
            CameraMode::Euler => {
                if let Some(angles) = self.camera.euler_angles() {
                    self.camera.set_euler_angles(
                        angles.yaw + yaw,
                        angles.pitch + pitch,
                        angles.roll + roll,
                        false,
                    )?;
                }
            }
            // turning right is a negative rotation about world up
            CameraMode::Quaternion => self.camera.apply_local_increments(-yaw, pitch, roll)?,
        }
        Ok(())
    }
}
