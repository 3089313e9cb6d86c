//! Keyboard input collection for one rendered frame.

use crawl_core::MoveIntent;
use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};

/// Keys consumed as discrete presses by the battle menu.
const ACTION_KEYS: [KeyCode; 8] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Q,
    KeyCode::I,
    KeyCode::Y,
    KeyCode::N,
];

#[derive(Default)]
pub struct FrameInput {
    pub keys_pressed: Vec<KeyCode>,
    /// Held movement keys, sampled every frame rather than edge-triggered.
    pub intent: MoveIntent,
}

pub fn capture_frame_input() -> FrameInput {
    let mut keys_pressed = Vec::with_capacity(ACTION_KEYS.len());
    for key in ACTION_KEYS {
        if is_key_pressed(key) {
            keys_pressed.push(key);
        }
    }

    let intent = MoveIntent {
        up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
        down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
        left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
        right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
    };

    FrameInput { keys_pressed, intent }
}
