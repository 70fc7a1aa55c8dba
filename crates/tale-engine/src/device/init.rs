/// How the game window's surface and device are set up.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when one is offered. With this off,
    /// shader output is stored in the framebuffer unconverted.
    pub prefer_srgb: bool,
    /// Present on vblank (`Fifo`) rather than as soon as a frame is ready.
    pub vsync: bool,
    pub power_preference: wgpu::PowerPreference,
}

impl GpuInit {
    pub(crate) fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            vsync: true,
            // A screen of text does not need the discrete GPU.
            power_preference: wgpu::PowerPreference::LowPower,
        }
    }
}
