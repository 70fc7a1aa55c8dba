//! The game window's GPU device and surface.
//!
//! [`Gpu`] opens the device, keeps the surface configured across resizes and
//! hands out one [`GpuFrame`] (encoder + surface view) per frame.

mod context;
mod init;
mod surface;

pub use context::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
