/// Keys the game reacts to.
///
/// Digits cover both the number row and the numpad. Everything else is
/// [`Key::Other`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    /// `0`..=`9`.
    Digit(u8),
    Other,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Window-system input after translation, free of winit types.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputEvent {
    Key { key: Key, state: KeyState },
    /// Keyboard focus gained (`true`) or lost.
    Focused(bool),
}
