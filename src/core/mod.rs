pub mod clock;
pub mod controller;
pub mod frame_input;
pub mod input_adapter;
pub mod rig;

pub use clock::Clock;
pub use controller::{Button, Controller};
pub use frame_input::{EdgeTrigger, FrameInput};
pub use input_adapter::WinitController;
pub use rig::{CameraRig, FrameEvents, Preset};
