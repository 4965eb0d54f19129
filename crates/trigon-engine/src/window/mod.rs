//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and runs the startup sequence and
//! per-frame work for the single demo window.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, default_resource_dir};
