mod angles;
mod basis;

pub use angles::{angle_delta, clamp_pitch, wrap_degrees, EulerAngles, PITCH_LIMIT};
pub use basis::Basis;
