use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};

/// The game window.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tale".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Drives one window and one [`App`] until the app asks to exit.
pub struct Runtime;

impl Runtime {
    /// Blocks until the game exits. Window or GPU setup failures are returned
    /// once the event loop has shut down.
    pub fn run<A: App>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create the event loop")?;
        let mut handler = Handler { config, gpu_init, app, session: None, failure: None };

        event_loop
            .run_app(&mut handler)
            .context("event loop terminated with an error")?;

        match handler.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// The open window with its surface and input tracking.
#[self_referencing]
struct Session {
    held: InputState,
    edges: InputFrame,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Handler<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    session: Option<Session>,
    failure: Option<anyhow::Error>,
}

impl<A: App> Handler<A> {
    fn open(&self, event_loop: &ActiveEventLoop) -> Result<Session> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        let window = event_loop
            .create_window(attrs)
            .context("failed to open the game window")?;

        let init = self.gpu_init.clone();
        SessionTryBuilder {
            held: InputState::default(),
            edges: InputFrame::default(),
            window,
            gpu_builder: |window| pollster::block_on(Gpu::new(window, init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }
}

/// Runs `app` for one frame, then drops the frame's release edges.
fn run_frame<A: App>(app: &mut A, session: &mut Session) -> AppControl {
    session.with_mut(|s| {
        let control = app.on_frame(&mut FrameCtx::new(s.window, s.gpu, s.edges));
        s.edges.clear();
        control
    })
}

impl<A: App> ApplicationHandler for Handler<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        match self.open(event_loop) {
            Ok(session) => {
                event_loop.set_control_flow(ControlFlow::Wait);
                session.borrow_window().request_redraw();
                self.session = Some(session);
            }
            Err(err) => {
                log::error!("{err:#}");
                self.failure = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Redraw continuously; presentation paces the loop.
        if let Some(session) = &self.session {
            session.borrow_window().request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Some(input) = translate_window_event(&event) {
            session.with_mut(|s| s.held.apply_event(s.edges, input));
        }

        let control = match event {
            WindowEvent::CloseRequested => self.app.on_close_requested(),
            WindowEvent::Resized(size) => {
                session.with_gpu_mut(|gpu| gpu.resize(size));
                AppControl::Continue
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = session.borrow_window().inner_size();
                session.with_gpu_mut(|gpu| gpu.resize(size));
                AppControl::Continue
            }
            WindowEvent::RedrawRequested => run_frame(&mut self.app, session),
            _ => AppControl::Continue,
        };

        if control == AppControl::Exit {
            // The surface goes before the window it borrows.
            self.session = None;
            event_loop.exit();
        }
    }
}
