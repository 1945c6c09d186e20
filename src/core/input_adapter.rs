use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};

/// Pixels of touchpad scroll that count as one wheel notch
const PIXELS_PER_SCROLL_LINE: f32 = 40.0;

/// [`Controller`] fed from winit window events.
///
/// Buttons are levels; cursor and wheel movement accumulate until
/// [`reset_deltas`](Self::reset_deltas) is called once per frame.
#[derive(Debug, Clone)]
pub struct WinitController {
    pressed_keys: HashSet<Button>,
    /// Same set in press order, backing `get_down_keys`
    pressed_vec: Vec<Button>,
    /// Last cursor position in window pixels, `None` until the first move
    mouse_position: Option<(f32, f32)>,
    mouse_delta: (f32, f32),
    /// Wheel movement since last reset, in lines
    scroll_delta: f32,
}

impl WinitController {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            pressed_vec: Vec::new(),
            mouse_position: None,
            mouse_delta: (0.0, 0.0),
            scroll_delta: 0.0,
        }
    }

    /// Fold one window event into the tracked state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.set_button(button, event.state);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(btn) = Self::mouse_button_to_button(*button) {
                    self.set_button(btn, *state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorLeft { .. } => {
                // next entry re-seeds the position instead of jumping
                self.mouse_position = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_SCROLL_LINE,
                };
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    /// Record a cursor position. The first position after creation or after
    /// the cursor left the window only seeds tracking and yields no delta.
    pub fn move_cursor(&mut self, x: f32, y: f32) {
        if let Some(old_pos) = self.mouse_position {
            self.mouse_delta.0 += x - old_pos.0;
            self.mouse_delta.1 += y - old_pos.1;
        }
        self.mouse_position = Some((x, y));
    }

    /// Accumulate raw pointer motion. A grabbed cursor stops reporting
    /// positions on some platforms, so captured look feeds device motion here.
    pub fn add_motion(&mut self, dx: f32, dy: f32) {
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    /// Clear cursor and wheel movement after the frame has consumed them
    pub fn reset_deltas(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
    }

    pub fn mouse_position(&self) -> Option<(f32, f32)> {
        self.mouse_position
    }

    /// Stop tracking the cursor and drop pending movement. Called when
    /// capture changes so the next position only seeds tracking again.
    pub fn forget_cursor(&mut self) {
        self.mouse_position = None;
        self.mouse_delta = (0.0, 0.0);
    }

    /// Drop every held button, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.pressed_vec.clear();
    }

    fn set_button(&mut self, button: Button, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.pressed_keys.insert(button) {
                    self.pressed_vec.push(button);
                }
            }
            ElementState::Released => {
                if self.pressed_keys.remove(&button) {
                    self.pressed_vec.retain(|&b| b != button);
                }
            }
        }
    }

    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::KeyQ => Some(Button::KeyQ),
            KeyCode::KeyE => Some(Button::KeyE),
            KeyCode::KeyR => Some(Button::KeyR),
            KeyCode::KeyM => Some(Button::KeyM),
            KeyCode::KeyL => Some(Button::KeyL),
            KeyCode::Digit1 => Some(Button::Digit1),
            KeyCode::Digit2 => Some(Button::Digit2),
            KeyCode::Digit3 => Some(Button::Digit3),
            KeyCode::Digit4 => Some(Button::Digit4),
            KeyCode::ArrowUp => Some(Button::ArrowUp),
            KeyCode::ArrowDown => Some(Button::ArrowDown),
            KeyCode::ArrowLeft => Some(Button::ArrowLeft),
            KeyCode::ArrowRight => Some(Button::ArrowRight),
            KeyCode::Space => Some(Button::Space),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Button::Shift),
            KeyCode::Tab => Some(Button::Tab),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }

    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}

impl Default for WinitController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }

    fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }
}
