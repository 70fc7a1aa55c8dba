use winit::dpi::PhysicalSize;

use super::GpuInit;

/// Frames the presentation engine may queue ahead.
const FRAME_LATENCY: u32 = 2;

/// What to do with a frame whose surface texture could not be acquired.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface went stale; configure it again and retry next frame.
    Reconfigure,
    SkipFrame,
    /// The device is out of memory; stop the game.
    Fatal,
}

pub(crate) fn error_action(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigure,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
    }
}

/// Surface configuration for a window of `size`, or `None` when the surface
/// reports no formats (it cannot be presented to).
pub(crate) fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    size: PhysicalSize<u32>,
    init: &GpuInit,
) -> Option<wgpu::SurfaceConfiguration> {
    let format = pick_format(&caps.formats, init.prefer_srgb)?;

    // The game paints every pixel, so an opaque surface is the natural fit.
    let alpha_mode = if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::Opaque) {
        wgpu::CompositeAlphaMode::Opaque
    } else {
        caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
    };

    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: init.present_mode(),
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: FRAME_LATENCY,
    })
}

fn pick_format(formats: &[wgpu::TextureFormat], prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb() == prefer_srgb)
        .or_else(|| formats.first().copied())
}
