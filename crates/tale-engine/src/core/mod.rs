//! The contract between the runtime and the game: [`App`] and the
//! [`FrameCtx`] it draws through.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
