//! Engine side of `tale`.
//!
//! One window with its GPU surface and keyboard input ([`window`],
//! [`device`], [`input`], [`core`]), and the text pipeline that draws the
//! story onto it ([`text`], rendered by [`render`]).

pub mod core;
pub mod device;
pub mod input;
pub mod window;

pub mod coords;
pub mod logging;
pub mod render;
pub mod text;
