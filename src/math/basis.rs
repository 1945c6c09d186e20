use glam::{Mat3, Quat, Vec3};

use super::angles::EulerAngles;

/// Roll below this many degrees is treated as zero by the Euler basis
const ROLL_EPSILON: f32 = 0.001;

/// Camera-space axes expressed in world space.
///
/// `right`, `up` and `-front` form a right-handed orthonormal frame, which is
/// the local X/Y/Z frame of a camera that looks down its own -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub front: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Default for Basis {
    fn default() -> Self {
        Self {
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }
}

impl Basis {
    /// Front vector for a yaw/pitch pair in degrees; yaw -90 looks down -Z
    pub fn front_from_yaw_pitch(yaw: f32, pitch: f32) -> Vec3 {
        let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    /// True when pitch has carried Front past vertical, where
    /// `front × world_up` and so Right (and Up) point opposite the heading
    pub fn pitch_inverts_right(pitch: f32) -> bool {
        pitch.to_radians().cos() < 0.0
    }

    /// Basis for Euler angles.
    ///
    /// Right comes from `front × world_up`, Up from `right × front`, and both
    /// are then turned about Front by the roll angle.
    pub fn from_euler(angles: &EulerAngles, world_up: Vec3) -> Self {
        let front = Self::front_from_yaw_pitch(angles.yaw, angles.pitch);

        // front parallel to world_up: fall back to the heading's right vector
        let right = front.cross(world_up).try_normalize().unwrap_or_else(|| {
            let yaw = angles.yaw.to_radians();
            Vec3::new(-yaw.sin(), 0.0, yaw.cos())
        });
        let up = right.cross(front).normalize();

        if angles.roll.abs() > ROLL_EPSILON {
            let roll = Quat::from_axis_angle(front, angles.roll.to_radians());
            Self {
                front,
                right: (roll * right).normalize(),
                up: (roll * up).normalize(),
            }
        } else {
            Self { front, right, up }
        }
    }

    /// Basis for a unit quaternion: local X, Y and -Z
    pub fn from_quaternion(orientation: Quat) -> Self {
        Self {
            front: (orientation * Vec3::NEG_Z).normalize(),
            right: (orientation * Vec3::X).normalize(),
            up: (orientation * Vec3::Y).normalize(),
        }
    }

    /// Rotation that carries the local frame onto this basis
    pub fn to_quaternion(&self) -> Quat {
        Quat::from_mat3(&Mat3::from_cols(self.right, self.up, -self.front)).normalize()
    }

    pub fn is_orthonormal(&self, length_tolerance: f32, dot_tolerance: f32) -> bool {
        let unit = |v: Vec3| (v.length() - 1.0).abs() <= length_tolerance;
        unit(self.front)
            && unit(self.right)
            && unit(self.up)
            && self.front.dot(self.right).abs() <= dot_tolerance
            && self.right.dot(self.up).abs() <= dot_tolerance
            && self.up.dot(self.front).abs() <= dot_tolerance
    }

    /// True when `right × up` points backwards along Front
    pub fn is_right_handed(&self, tolerance: f32) -> bool {
        self.right.cross(self.up).dot(-self.front) >= 1.0 - tolerance
    }

    /// Largest angle in degrees between corresponding axes of two bases
    pub fn max_angle_to(&self, other: &Basis) -> f32 {
        let angle = |a: Vec3, b: Vec3| a.cross(b).length().atan2(a.dot(b));
        [
            angle(self.front, other.front),
            angle(self.right, other.right),
            angle(self.up, other.up),
        ]
        .into_iter()
        .fold(0.0, f32::max)
        .to_degrees()
    }
}
