use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState};

/// Translates the window events the game cares about: keyboard keys and focus.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(focused) => Some(InputEvent::Focused(*focused)),
        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            },
        }),
        _ => None,
    }
}

/// Physical key mapping, so choices stay on `1`/`2` under any layout.
fn map_key(key: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = key else {
        return Key::Other;
    };

    let digit = match code {
        KeyCode::Escape => return Key::Escape,
        KeyCode::Digit0 | KeyCode::Numpad0 => 0,
        KeyCode::Digit1 | KeyCode::Numpad1 => 1,
        KeyCode::Digit2 | KeyCode::Numpad2 => 2,
        KeyCode::Digit3 | KeyCode::Numpad3 => 3,
        KeyCode::Digit4 | KeyCode::Numpad4 => 4,
        KeyCode::Digit5 | KeyCode::Numpad5 => 5,
        KeyCode::Digit6 | KeyCode::Numpad6 => 6,
        KeyCode::Digit7 | KeyCode::Numpad7 => 7,
        KeyCode::Digit8 | KeyCode::Numpad8 => 8,
        KeyCode::Digit9 | KeyCode::Numpad9 => 9,
        _ => return Key::Other,
    };
    Key::Digit(digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_row_and_numpad_agree() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Digit1)), Key::Digit(1));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Numpad1)), Key::Digit(1));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Numpad2)), Key::Digit(2));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Digit0)), Key::Digit(0));
    }

    #[test]
    fn escape_and_others() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Other);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Enter)), Key::Other);
    }

    #[test]
    fn focus_is_translated() {
        assert_eq!(
            translate_window_event(&WindowEvent::Focused(false)),
            Some(InputEvent::Focused(false))
        );
        assert_eq!(translate_window_event(&WindowEvent::CloseRequested), None);
    }
}
