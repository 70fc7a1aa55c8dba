use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::render::RenderCtx;

use super::surface::{self, SurfaceErrorAction};
use super::GpuInit;

/// A surface texture being rendered this frame.
///
/// Holding it blocks acquisition of the next one, so hand it back to
/// [`Gpu::present`] within the frame.
pub struct GpuFrame {
    surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Device, queue and the configured surface of the game window.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    /// Drawable size in physical pixels; zero while minimized.
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create the window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to the window")?;
        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("tale device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to open the GPU device")?;

        let caps = surface.get_capabilities(&adapter);
        let config = surface::surface_config(&caps, size, &init)
            .context("the window surface offers no texture formats")?;
        log::debug!("surface: {:?} {:?} {:?}", config.format, config.present_mode, config.alpha_mode);
        if size.width > 0 && size.height > 0 {
            surface.configure(&device, &config);
        }

        Ok(Self { surface, device, queue, config, size })
    }

    pub fn is_minimized(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    /// Device handles for renderers.
    pub fn render_ctx(&self) -> RenderCtx<'_> {
        RenderCtx {
            device: &self.device,
            queue: &self.queue,
            surface_format: self.config.format,
        }
    }

    /// Follows a window resize. A zero size is remembered but not applied.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.size = size;
        if self.is_minimized() {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn begin_frame(&self) -> Result<GpuFrame, wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("tale frame") });
        Ok(GpuFrame { surface_texture, view, encoder })
    }

    /// Submits the frame's commands and shows it.
    pub fn present(&self, frame: GpuFrame) {
        let GpuFrame { surface_texture, view, encoder } = frame;
        self.queue.submit([encoder.finish()]);
        drop(view);
        surface_texture.present();
    }

    /// Handles a failed [`begin_frame`](Self::begin_frame), reconfiguring the
    /// surface when it went stale.
    pub fn recover(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        let action = surface::error_action(&err);
        log::debug!("surface error {err}: {action:?}");
        if action == SurfaceErrorAction::Reconfigure && !self.is_minimized() {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}
