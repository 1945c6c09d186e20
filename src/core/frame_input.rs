use crate::camera::Movement;

use super::controller::{Button, Controller};

/// Rising-edge detector for keys that should fire once per press
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTrigger {
    was_down: bool,
}

impl EdgeTrigger {
    pub const fn new() -> Self {
        Self { was_down: false }
    }

    /// Feed the current level; true only on the frame it goes from up to down
    pub fn rising(&mut self, down: bool) -> bool {
        let fired = down && !self.was_down;
        self.was_down = down;
        fired
    }
}

/// One frame of input, captured once and handed to the camera update.
///
/// Look delta follows the camera convention: positive `x` turns right and
/// positive `y` looks up, i.e. screen Y is already flipped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameInput {
    pub movement: Vec<Movement>,
    /// Keyboard rotation direction per axis: yaw (left/right), pitch (up/down), roll (Q/E)
    pub rotation: [f32; 3],
    pub look_delta: (f32, f32),
    pub scroll_delta: f32,
    pub reset: bool,
    pub toggle_mode: bool,
    pub look_at_target: bool,
    pub toggle_capture: bool,
    /// Keys 1 to 4: the quaternion presets and steps run by the rig
    pub world_axes_preset: bool,
    pub axis_angle_preset: bool,
    pub world_step: bool,
    pub local_step: bool,
}

impl FrameInput {
    pub fn capture<C: Controller + ?Sized>(controller: &C) -> Self {
        const MOVEMENT_KEYS: [(Button, Movement); 6] = [
            (Button::KeyW, Movement::Forward),
            (Button::KeyS, Movement::Backward),
            (Button::KeyA, Movement::Left),
            (Button::KeyD, Movement::Right),
            (Button::Space, Movement::Up),
            (Button::Shift, Movement::Down),
        ];

        let movement = MOVEMENT_KEYS
            .iter()
            .filter(|(button, _)| controller.is_down(*button))
            .map(|&(_, movement)| movement)
            .collect();

        let axis = |positive: Button, negative: Button| {
            match (controller.is_down(positive), controller.is_down(negative)) {
                (true, false) => 1.0,
                (false, true) => -1.0,
                _ => 0.0,
            }
        };

        let (dx, dy) = controller.mouse_delta();

        Self {
            movement,
            rotation: [
                axis(Button::ArrowRight, Button::ArrowLeft),
                axis(Button::ArrowUp, Button::ArrowDown),
                axis(Button::KeyE, Button::KeyQ),
            ],
            look_delta: (dx, -dy),
            scroll_delta: controller.scroll_delta(),
            reset: controller.is_down(Button::KeyR),
            toggle_mode: controller.is_down(Button::KeyM),
            look_at_target: controller.is_down(Button::KeyL),
            toggle_capture: controller.is_down(Button::Tab),
            world_axes_preset: controller.is_down(Button::Digit1),
            axis_angle_preset: controller.is_down(Button::Digit2),
            world_step: controller.is_down(Button::Digit3),
            local_step: controller.is_down(Button::Digit4),
        }
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation.iter().any(|&r| r != 0.0)
    }
}
