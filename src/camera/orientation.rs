use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use glam::{DQuat, DVec3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::{wrap_degrees, Basis, EulerAngles};

/// Discarded roll at or below this many degrees is not reported
const ROLL_REPORT_THRESHOLD: f32 = 0.01;

/// Horizontal length of Front below which yaw is read from Right instead
const GIMBAL_EPSILON: f64 = 1e-4;

/// Which representation drives the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    #[default]
    Euler,
    Quaternion,
}

impl CameraMode {
    pub const fn toggled(self) -> Self {
        match self {
            CameraMode::Euler => CameraMode::Quaternion,
            CameraMode::Quaternion => CameraMode::Euler,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CameraMode::Euler => "euler",
            CameraMode::Quaternion => "quaternion",
        }
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authoritative rotation of a camera.
///
/// Only the active representation is stored. Moving to the other one goes
/// through [`Orientation::to_mode`], which is lossless from Euler to
/// quaternion and drops roll from quaternion to Euler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    Euler(EulerAngles),
    Quaternion(Quat),
}

impl Orientation {
    pub fn mode(&self) -> CameraMode {
        match self {
            Orientation::Euler(_) => CameraMode::Euler,
            Orientation::Quaternion(_) => CameraMode::Quaternion,
        }
    }

    pub fn basis(&self, world_up: Vec3) -> Basis {
        match self {
            Orientation::Euler(angles) => Basis::from_euler(angles, world_up),
            Orientation::Quaternion(q) => Basis::from_quaternion(*q),
        }
    }

    /// Quaternion composed as `Ry(yaw) * Rx(pitch) * Rz(roll)` about the
    /// world axes.
    ///
    /// This is not the mode-switch conversion: it applies no heading offset
    /// and no yaw-adjusted pitch axis, so the same (yaw, pitch) gives a
    /// different view than [`euler_to_quaternion`].
    pub fn from_world_axes(yaw: f32, pitch: f32, roll: f32) -> Self {
        let q_yaw = Quat::from_axis_angle(Vec3::Y, yaw.to_radians());
        let q_pitch = Quat::from_axis_angle(Vec3::X, pitch.to_radians());
        let q_roll = Quat::from_axis_angle(Vec3::Z, roll.to_radians());
        Orientation::Quaternion((q_yaw * q_pitch * q_roll).normalize())
    }

    /// Convert into `mode`, returning the new orientation and the roll in
    /// degrees that the conversion threw away, if any.
    pub fn to_mode(&self, mode: CameraMode) -> (Orientation, Option<f32>) {
        match (self, mode) {
            (Orientation::Euler(angles), CameraMode::Quaternion) => {
                (Orientation::Quaternion(euler_to_quaternion(angles)), None)
            }
            (Orientation::Quaternion(q), CameraMode::Euler) => {
                let conversion = quaternion_to_euler(*q);
                let discarded = (conversion.discarded_roll.abs() > ROLL_REPORT_THRESHOLD)
                    .then_some(conversion.discarded_roll);
                (Orientation::Euler(conversion.angles), discarded)
            }
            _ => (*self, None),
        }
    }
}

/// Outcome of a quaternion to Euler conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerConversion {
    /// Recovered yaw and pitch, roll always zero
    pub angles: EulerAngles,
    /// Roll about Front present in the quaternion but not carried over
    pub discarded_roll: f32,
}

/// Result of [`Camera::set_mode`](crate::camera::Camera::set_mode)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeSwitch {
    pub from: CameraMode,
    pub to: CameraMode,
    pub discarded_roll: Option<f32>,
}

impl ModeSwitch {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    pub fn lost_roll(&self) -> bool {
        self.discarded_roll.is_some()
    }
}

/// Euler angles to quaternion, as used when switching into quaternion mode.
///
/// Heading `-(yaw + 90°)` about world Y, then pitch about the heading-rotated
/// local X (`q = pitch * yaw`), then roll about the resulting Front. Yields
/// the same Front/Right/Up as [`Basis::from_euler`] for a Y-up world,
/// including pitches past vertical where the Euler Right reverses; that flip
/// is folded into the roll as an extra half turn.
/// Composed in f64 so a round trip through [`quaternion_to_euler`] is only
/// limited by the final rounding.
pub fn euler_to_quaternion(angles: &EulerAngles) -> Quat {
    let yaw = f64::from(angles.yaw).to_radians();
    let pitch = f64::from(angles.pitch).to_radians();
    let mut roll = f64::from(angles.roll).to_radians();
    if Basis::pitch_inverts_right(angles.pitch) {
        roll += PI;
    }

    let q_yaw = DQuat::from_axis_angle(DVec3::Y, -(yaw + FRAC_PI_2));
    let local_x = q_yaw * DVec3::X;
    let q_pitch = DQuat::from_axis_angle(local_x, pitch);
    let mut q = (q_pitch * q_yaw).normalize();

    if roll != 0.0 {
        let front = q * DVec3::NEG_Z;
        q = (DQuat::from_axis_angle(front, roll) * q).normalize();
    }
    q.as_quat().normalize()
}

/// Quaternion to Euler angles using a Y-X-Z decomposition.
///
/// Yaw and pitch are read off Front, with yaw wrapped into [-180, 180]. When
/// Front is vertical yaw comes from Right instead, read so that
/// [`Basis::from_euler`] rebuilds that Right at the recovered pitch. The
/// remaining rotation about Front is reported in `discarded_roll` and not
/// reconstructed.
pub fn quaternion_to_euler(orientation: Quat) -> EulerConversion {
    let q = orientation.as_dquat().normalize();
    let front = q * DVec3::NEG_Z;
    let right = q * DVec3::X;
    let up = q * DVec3::Y;

    let horizontal = front.x.hypot(front.z);
    let pitch = front.y.atan2(horizontal);
    let pitch_degrees = pitch.to_degrees() as f32;
    // only reachable when the rounded pitch lands on 90
    let inverted = Basis::pitch_inverts_right(pitch_degrees);
    let yaw = if horizontal > GIMBAL_EPSILON {
        front.z.atan2(front.x)
    } else if inverted {
        right.x.atan2(-right.z)
    } else {
        (-right.x).atan2(right.z)
    };

    // Up of the roll-free camera with this yaw and pitch
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    let mut level_up = DVec3::new(-cos_yaw * sin_pitch, cos_pitch, -sin_yaw * sin_pitch);
    if inverted {
        level_up = -level_up;
    }
    let discarded_roll = level_up.cross(up).dot(front).atan2(level_up.dot(up));

    EulerConversion {
        angles: EulerAngles::yaw_pitch(
            wrap_degrees(yaw.to_degrees() as f32),
            pitch_degrees,
        ),
        discarded_roll: discarded_roll.to_degrees() as f32,
    }
}
