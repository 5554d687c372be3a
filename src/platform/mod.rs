//! Platform abstraction layer
//!
//! Handles everything the game needs from the outside world:
//! - Window lifetime (close flag)
//! - Keyboard/mouse state
//! - Monotonic time
//!
//! The loop only polls; nothing here blocks.

pub mod headless;
pub mod input;

pub use headless::{HeadlessPlatform, HoldSegment, TimeSource};
pub use input::{FrameInput, map_input};

use glam::Vec2;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    /// Rotate counter-clockwise (`A`)
    Left,
    /// Rotate clockwise (`D`)
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    Pressed,
    #[default]
    Released,
}

impl ButtonState {
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == ButtonState::Pressed
    }
}

/// Windowing and input collaborator
pub trait Platform {
    /// Pump pending events. Must return immediately.
    fn poll_events(&mut self);

    fn should_close(&self) -> bool;

    fn request_close(&mut self);

    fn key_state(&self, key: Key) -> ButtonState;

    fn mouse_button_state(&self, button: MouseButton) -> ButtonState;

    /// Cursor position in window pixels (origin top-left)
    fn cursor_position(&self) -> Vec2;

    /// Monotonic seconds
    fn now(&self) -> f64;

    /// Window size in pixels
    fn size(&self) -> (u32, u32);
}
