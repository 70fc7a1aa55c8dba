use super::ctx::FrameCtx;

/// Whether the runtime keeps going after a callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// The game side of [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Runs one frame: read `ctx.input`, update, then draw through
    /// [`FrameCtx::render`].
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// The player closed the window. `Continue` keeps it open.
    fn on_close_requested(&mut self) -> AppControl;
}
