//! Trigon engine crate.
//!
//! Owns the platform + GPU pieces of the demo: device acquisition, the
//! presentation surface, the fixed scene pipeline, the per-frame renderer and
//! the immediate-mode GUI overlay drawn on top of it.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod error;
pub mod gui;
pub mod logging;
pub mod render;

pub use error::InitError;
