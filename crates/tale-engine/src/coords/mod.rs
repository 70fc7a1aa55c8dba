//! Positions and colors on the text canvas.
//!
//! Text is placed on a fixed 1280x720 canvas with the origin at the
//! bottom-left and +Y up. [`Viewport::ortho_projection`] maps that canvas to
//! clip space; the window's real size never enters the math.

mod color;
mod point;
mod viewport;

pub use color::ColorRgba;
pub use point::Point;
pub use viewport::Viewport;
