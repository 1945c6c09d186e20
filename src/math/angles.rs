/// Pitch bound used wherever pitch is constrained, in degrees.
/// Keeps Front away from world up so the Euler basis stays defined.
pub const PITCH_LIMIT: f32 = 89.0;

/// Yaw/pitch/roll triple in degrees.
///
/// Yaw turns about world up, pitch about the camera's right axis and roll
/// about its front axis. None of the angles is wrapped or clamped unless a
/// caller asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl EulerAngles {
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Yaw and pitch only, roll zero
    pub const fn yaw_pitch(yaw: f32, pitch: f32) -> Self {
        Self::new(yaw, pitch, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.yaw.is_finite() && self.pitch.is_finite() && self.roll.is_finite()
    }

    /// Copy with pitch clamped to `±PITCH_LIMIT`
    pub fn with_constrained_pitch(self) -> Self {
        Self {
            pitch: clamp_pitch(self.pitch),
            ..self
        }
    }
}

pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

/// Wrap an angle in degrees into [-180, 180]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps 180 to -180; keep +180 stable for inputs that were already in range
    if wrapped == -180.0 && angle > 0.0 {
        180.0
    } else {
        wrapped
    }
}

/// Shortest signed difference `b - a` between two angles in degrees
pub fn angle_delta(a: f32, b: f32) -> f32 {
    wrap_degrees(b - a)
}
