//! Maps held keys and mouse buttons to game commands

use super::{Key, MouseButton, Platform};
use crate::sim::{RotateDir, TickInput};

/// Commands gathered for one loop iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Escape was held
    pub quit: bool,
    pub rotate: Option<RotateDir>,
}

impl FrameInput {
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            rotate: self.rotate,
        }
    }
}

/// Read the platform's input state for this iteration.
///
/// `A` spins counter-clockwise and `D` clockwise. Holding the mouse button
/// spins toward the half of the window the cursor is in. Opposite inputs
/// cancel; agreeing inputs still produce a single command.
pub fn map_input<P: Platform + ?Sized>(platform: &P) -> FrameInput {
    let quit = platform.key_state(Key::Escape).is_pressed();

    let mut axis = 0;
    if platform.key_state(Key::Left).is_pressed() {
        axis += 1;
    }
    if platform.key_state(Key::Right).is_pressed() {
        axis -= 1;
    }
    if platform.mouse_button_state(MouseButton::Primary).is_pressed() {
        let (width, _) = platform.size();
        if platform.cursor_position().x >= width as f32 / 2.0 {
            axis -= 1;
        } else {
            axis += 1;
        }
    }

    FrameInput {
        quit,
        rotate: RotateDir::from_axis(axis),
    }
}
