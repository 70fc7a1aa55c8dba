use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Keys held down in the game window.
///
/// A release only counts when the matching press was seen while the window
/// had focus; this keeps a key pressed in another window (or held across a
/// focus switch) from picking a choice.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    /// Folds `ev` into the held set and records release edges into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(false) => self.held.clear(),
            InputEvent::Focused(true) => {}

            InputEvent::Key { key, state: KeyState::Pressed } => {
                self.held.insert(key);
            }
            InputEvent::Key { key, state: KeyState::Released } => {
                if self.held.remove(&key) {
                    frame.keys_released.insert(key);
                }
            }
        }
    }
}
