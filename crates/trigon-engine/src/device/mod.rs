//! GPU device + surface management.
//!
//! This module is responsible for:
//! - acquiring the wgpu Instance/Adapter/Device/Queue (`GraphicsContext`)
//! - creating & configuring the Surface (`PresentationSurface`)
//! - acquiring frames and providing encoders/views for rendering

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::GraphicsContext;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
pub use surface::{PresentationSurface, ResizeOutcome, choose_surface_format, resized_config};
