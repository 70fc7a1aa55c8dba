/// Logical canvas size in pixels.
///
/// Text is positioned on this canvas regardless of the window's physical size.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Column-major orthographic projection mapping `[0, width] x [0, height]`
    /// to clip space, bottom-left origin, depth range `[-1, 1]`.
    pub fn ortho_projection(self) -> [[f32; 4]; 4] {
        [
            [2.0 / self.width, 0.0, 0.0, 0.0],
            [0.0, 2.0 / self.height, 0.0, 0.0],
            [0.0, 0.0, -1.0, 0.0],
            [-1.0, -1.0, 0.0, 1.0],
        ]
    }
}
