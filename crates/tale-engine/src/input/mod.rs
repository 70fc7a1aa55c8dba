//! Keyboard input for the game window.
//!
//! [`platform`] turns winit events into [`InputEvent`]s, [`InputState`]
//! tracks held keys and [`InputFrame`] carries one frame's release edges to
//! the game.

mod frame;
mod state;
mod types;

pub mod platform;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
