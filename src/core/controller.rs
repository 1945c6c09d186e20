/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    KeyR,
    KeyM,
    KeyL,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Shift,
    Tab,
    Escape,
    MouseLeft,
    MouseRight,
}

impl Button {
    pub const ALL: [Button; 23] = [
        Button::KeyW,
        Button::KeyA,
        Button::KeyS,
        Button::KeyD,
        Button::KeyQ,
        Button::KeyE,
        Button::KeyR,
        Button::KeyM,
        Button::KeyL,
        Button::Digit1,
        Button::Digit2,
        Button::Digit3,
        Button::Digit4,
        Button::ArrowUp,
        Button::ArrowDown,
        Button::ArrowLeft,
        Button::ArrowRight,
        Button::Space,
        Button::Shift,
        Button::Tab,
        Button::Escape,
        Button::MouseLeft,
        Button::MouseRight,
    ];
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];

    /// Cursor movement in pixels since the last frame, screen Y pointing down
    fn mouse_delta(&self) -> (f32, f32) {
        (0.0, 0.0)
    }

    /// Scroll wheel movement since the last frame, positive away from the user
    fn scroll_delta(&self) -> f32 {
        0.0
    }
}
