pub mod orientation;

pub use orientation::{
    euler_to_quaternion, quaternion_to_euler, CameraMode, EulerConversion, ModeSwitch, Orientation,
};

use glam::{Mat4, Quat, Vec3};

use crate::error::CameraError;
use crate::math::{clamp_pitch, Basis, EulerAngles};
use crate::traits::CameraView;
use crate::types::CameraUniform;

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SPEED: f32 = 1.0;
pub const DEFAULT_SENSITIVITY: f32 = 0.05;
pub const FOV_MIN: f32 = 1.0;
pub const FOV_MAX: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Squared length under which a direction or axis counts as zero
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Squared sine of the angle between look direction and world up below which
/// the look-at basis is rejected
const PARALLEL_EPSILON: f32 = 1e-10;

/// Translation directions for [`Camera::process_movement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// First-person camera with a switchable Euler/quaternion orientation.
///
/// Front, Right and Up are cached and recomputed after every orientation
/// change, so reads are free and always match the active representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    world_up: Vec3,
    orientation: Orientation,
    basis: Basis,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        let orientation = Orientation::Euler(EulerAngles::yaw_pitch(DEFAULT_YAW, DEFAULT_PITCH));
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            world_up: Vec3::Y,
            basis: orientation.basis(Vec3::Y),
            orientation,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            fov: FOV_MAX,
        }
    }
}

impl Camera {
    /// Build a camera facing (yaw, pitch) with zero roll.
    ///
    /// World up may have any length but must point along +Y: both mode-switch
    /// conversions and quaternion mouse look are defined in a Y-up frame.
    ///
    /// In quaternion mode the starting quaternion is the mode-switch
    /// conversion of the same angles, so both modes start with one view.
    pub fn new(
        position: Vec3,
        world_up: Vec3,
        yaw: f32,
        pitch: f32,
        mode: CameraMode,
    ) -> Result<Self, CameraError> {
        if !world_up.is_finite() || world_up.length_squared() < DEGENERATE_EPSILON {
            return Err(CameraError::InvalidWorldUp(world_up));
        }
        if (world_up.normalize() - Vec3::Y).length_squared() > PARALLEL_EPSILON {
            return Err(CameraError::InvalidWorldUp(world_up));
        }
        if !position.is_finite() || !yaw.is_finite() || !pitch.is_finite() {
            return Err(CameraError::NonFinite("Camera::new"));
        }

        let world_up = world_up.normalize();
        let (orientation, _) = Orientation::Euler(EulerAngles::yaw_pitch(yaw, pitch)).to_mode(mode);

        Ok(Self {
            position,
            world_up,
            basis: orientation.basis(world_up),
            orientation,
            ..Self::default()
        })
    }

    pub fn with_movement_speed(mut self, speed: f32) -> Self {
        self.movement_speed = speed;
        self
    }

    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.set_fov(fov);
        self
    }

    pub fn mode(&self) -> CameraMode {
        self.orientation.mode()
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    /// Current Euler angles, `None` in quaternion mode
    pub fn euler_angles(&self) -> Option<EulerAngles> {
        match self.orientation {
            Orientation::Euler(angles) => Some(angles),
            Orientation::Quaternion(_) => None,
        }
    }

    /// Current quaternion, `None` in Euler mode
    pub fn quaternion(&self) -> Option<Quat> {
        match self.orientation {
            Orientation::Quaternion(q) => Some(q),
            Orientation::Euler(_) => None,
        }
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    pub fn front(&self) -> Vec3 {
        self.basis.front
    }

    pub fn right(&self) -> Vec3 {
        self.basis.right
    }

    pub fn up(&self) -> Vec3 {
        self.basis.up
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(FOV_MIN, FOV_MAX);
    }

    /// Switch the authoritative representation, converting the current one.
    pub fn set_mode(&mut self, mode: CameraMode) -> ModeSwitch {
        let from = self.mode();
        let (orientation, discarded_roll) = self.orientation.to_mode(mode);

        if from != mode {
            self.set_orientation(orientation);
            log::info!("camera mode {} -> {}", from, mode);
            if let Some(roll) = discarded_roll {
                log::warn!("switching to {} mode discarded {:.2} degrees of roll", mode, roll);
            }
        }

        ModeSwitch {
            from,
            to: mode,
            discarded_roll,
        }
    }

    /// Turn the camera towards `target`.
    ///
    /// Euler mode derives yaw/pitch from the direction (pitch clamped, roll
    /// kept). Quaternion mode builds the quaternion straight from the look
    /// basis so repeated calls do not drift through an angle round-trip.
    pub fn look_at(&mut self, target: Vec3) -> Result<(), CameraError> {
        if !target.is_finite() {
            return Err(CameraError::NonFinite("Camera::look_at"));
        }
        let offset = target - self.position;
        if offset.length_squared() < DEGENERATE_EPSILON {
            return Err(CameraError::DegenerateTarget(target));
        }
        let direction = offset.normalize();

        let orientation = match self.orientation {
            Orientation::Euler(angles) => {
                let pitch = clamp_pitch(direction.y.clamp(-1.0, 1.0).asin().to_degrees());
                let yaw = direction.z.atan2(direction.x).to_degrees();
                Orientation::Euler(EulerAngles::new(yaw, pitch, angles.roll))
            }
            Orientation::Quaternion(_) => {
                let side = direction.cross(self.world_up);
                if side.length_squared() < PARALLEL_EPSILON {
                    return Err(CameraError::DegenerateBasis(direction));
                }
                let right = side.normalize();
                let up = right.cross(direction);
                let basis = Basis {
                    front: direction,
                    right,
                    up,
                };
                Orientation::Quaternion(basis.to_quaternion())
            }
        };

        self.set_orientation(orientation);
        Ok(())
    }

    /// Overwrite yaw, pitch and roll. Euler mode only.
    pub fn set_euler_angles(
        &mut self,
        yaw: f32,
        pitch: f32,
        roll: f32,
        constrain_pitch: bool,
    ) -> Result<(), CameraError> {
        self.require_mode("set_euler_angles", CameraMode::Euler)?;
        let mut angles = EulerAngles::new(yaw, pitch, roll);
        if !angles.is_finite() {
            return Err(CameraError::NonFinite("set_euler_angles"));
        }
        if constrain_pitch {
            angles = angles.with_constrained_pitch();
        }
        self.set_orientation(Orientation::Euler(angles));
        Ok(())
    }

    /// Set the quaternion from world-axis yaw/pitch/roll, see
    /// [`Orientation::from_world_axes`]. Quaternion mode only.
    pub fn set_quaternion_from_euler(
        &mut self,
        yaw: f32,
        pitch: f32,
        roll: f32,
    ) -> Result<(), CameraError> {
        self.require_mode("set_quaternion_from_euler", CameraMode::Quaternion)?;
        if !EulerAngles::new(yaw, pitch, roll).is_finite() {
            return Err(CameraError::NonFinite("set_quaternion_from_euler"));
        }
        self.set_orientation(Orientation::from_world_axes(yaw, pitch, roll));
        Ok(())
    }

    /// Replace the quaternion with a rotation of `degrees` about `axis`.
    pub fn set_from_axis_angle(&mut self, axis: Vec3, degrees: f32) -> Result<(), CameraError> {
        self.require_mode("set_from_axis_angle", CameraMode::Quaternion)?;
        let rotation = axis_angle(axis, degrees)?;
        self.set_orientation(Orientation::Quaternion(rotation));
        Ok(())
    }

    /// Left-multiply the quaternion by a rotation about a world-space axis.
    ///
    /// Passing the camera's own `right()`/`up()`/`front()` rotates about the
    /// current local axes without any gimbal singularity.
    pub fn apply_incremental_rotation(
        &mut self,
        axis: Vec3,
        degrees: f32,
    ) -> Result<(), CameraError> {
        let q = self.require_quaternion("apply_incremental_rotation")?;
        let delta = axis_angle(axis, degrees)?;
        self.set_orientation(Orientation::Quaternion((delta * q).normalize()));
        Ok(())
    }

    /// Yaw about world up, pitch about local right and roll about local front
    /// in one step: `q = yaw * q * pitch * roll`.
    pub fn apply_local_increments(
        &mut self,
        yaw: f32,
        pitch: f32,
        roll: f32,
    ) -> Result<(), CameraError> {
        let q = self.require_quaternion("apply_local_increments")?;
        if !EulerAngles::new(yaw, pitch, roll).is_finite() {
            return Err(CameraError::NonFinite("apply_local_increments"));
        }
        let q_yaw = Quat::from_axis_angle(self.world_up, yaw.to_radians());
        let q_pitch = Quat::from_axis_angle(Vec3::X, pitch.to_radians());
        let q_roll = Quat::from_axis_angle(Vec3::NEG_Z, roll.to_radians());
        self.set_orientation(Orientation::Quaternion(
            (q_yaw * q * q_pitch * q_roll).normalize(),
        ));
        Ok(())
    }

    /// Translate along the camera axes. Orientation is untouched.
    pub fn process_movement(&mut self, direction: Movement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        let step = match direction {
            Movement::Forward => self.basis.front,
            Movement::Backward => -self.basis.front,
            Movement::Left => -self.basis.right,
            Movement::Right => self.basis.right,
            Movement::Up => self.world_up,
            Movement::Down => -self.world_up,
        };
        self.position += step * velocity;
    }

    /// Mouse-look. Offsets are in pixels with positive `dy` meaning up.
    ///
    /// Euler mode adds straight to yaw/pitch and locks up near ±90° pitch.
    /// Quaternion mode pitches about the current Right then yaws about world
    /// Y, which has no such singularity.
    pub fn process_look_delta(&mut self, dx: f32, dy: f32, constrain_pitch: bool) {
        if !dx.is_finite() || !dy.is_finite() {
            log::debug!("ignoring non-finite look delta ({}, {})", dx, dy);
            return;
        }
        let dx = dx * self.mouse_sensitivity;
        let dy = dy * self.mouse_sensitivity;

        let orientation = match self.orientation {
            Orientation::Euler(angles) => {
                let mut angles = EulerAngles::new(angles.yaw + dx, angles.pitch + dy, angles.roll);
                if constrain_pitch {
                    angles = angles.with_constrained_pitch();
                }
                Orientation::Euler(angles)
            }
            Orientation::Quaternion(q) => {
                let q_pitch = Quat::from_axis_angle(self.basis.right, dy.to_radians());
                let q_yaw = Quat::from_axis_angle(self.world_up, (-dx).to_radians());
                Orientation::Quaternion((q_yaw * q_pitch * q).normalize())
            }
        };
        self.set_orientation(orientation);
    }

    pub fn process_zoom(&mut self, scroll_delta: f32) {
        if scroll_delta.is_finite() {
            self.set_fov(self.fov - scroll_delta);
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.basis.front, self.basis.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    pub fn to_uniform(&self, aspect: f32) -> CameraUniform {
        CameraUniform::new(self, aspect)
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.basis = orientation.basis(self.world_up);
    }

    fn require_mode(&self, operation: &'static str, required: CameraMode) -> Result<(), CameraError> {
        let current = self.mode();
        if current == required {
            Ok(())
        } else {
            Err(CameraError::ModeMismatch {
                operation,
                required,
                current,
            })
        }
    }

    fn require_quaternion(&self, operation: &'static str) -> Result<Quat, CameraError> {
        match self.orientation {
            Orientation::Quaternion(q) => Ok(q),
            Orientation::Euler(_) => Err(CameraError::ModeMismatch {
                operation,
                required: CameraMode::Quaternion,
                current: CameraMode::Euler,
            }),
        }
    }
}

impl CameraView for Camera {
    fn view_matrix(&self) -> Mat4 {
        Camera::view_matrix(self)
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.basis.front
    }

    fn fov_degrees(&self) -> f32 {
        self.fov
    }
}

fn axis_angle(axis: Vec3, degrees: f32) -> Result<Quat, CameraError> {
    if !degrees.is_finite() {
        return Err(CameraError::NonFinite("axis angle"));
    }
    if !axis.is_finite() || axis.length_squared() < DEGENERATE_EPSILON {
        return Err(CameraError::InvalidAxis(axis));
    }
    Ok(Quat::from_axis_angle(axis.normalize(), degrees.to_radians()).normalize())
}
