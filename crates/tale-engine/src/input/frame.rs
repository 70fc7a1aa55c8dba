use std::collections::HashSet;

use super::types::Key;

/// Keys released since the previous frame.
///
/// Choices fire on release, so this is the only per-frame edge the game
/// consumes. The runtime clears it after every `on_frame`.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub keys_released: HashSet<Key>,
}

impl InputFrame {
    pub fn released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn clear(&mut self) {
        self.keys_released.clear();
    }
}
