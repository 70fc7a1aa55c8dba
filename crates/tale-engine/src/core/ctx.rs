use winit::window::Window;

use crate::coords::ColorRgba;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::InputFrame;
use crate::render::{RenderCtx, RenderTarget};

use super::app::AppControl;

/// What [`App::on_frame`](super::App::on_frame) gets to work with.
///
/// `'w` is the window borrow held by the surface inside [`Gpu`].
pub struct FrameCtx<'a, 'w> {
    /// Keys released since the last frame.
    pub input: &'a InputFrame,
    window: &'a Window,
    gpu: &'a mut Gpu<'w>,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    pub(crate) fn new(window: &'a Window, gpu: &'a mut Gpu<'w>, input: &'a InputFrame) -> Self {
        Self { input, window, gpu }
    }

    /// Clears the window to `clear`, lets `draw` record on top, and presents.
    ///
    /// Nothing is drawn while the window is minimized or the surface is
    /// unavailable; only an out-of-memory surface returns
    /// [`AppControl::Exit`].
    pub fn render<F>(&mut self, clear: ColorRgba, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        if self.gpu.is_minimized() {
            return AppControl::Continue;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                if self.gpu.recover(err) == SurfaceErrorAction::Fatal {
                    log::error!("GPU surface is out of memory");
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        {
            let mut target = RenderTarget { encoder: &mut frame.encoder, color_view: &frame.view };
            target.clear(clear);
            draw(&self.gpu.render_ctx(), &mut target);
        }

        self.window.pre_present_notify();
        self.gpu.present(frame);
        AppControl::Continue
    }
}
