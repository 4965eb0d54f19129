//! Immediate-mode GUI overlay.
//!
//! Wraps egui's per-frame begin/layout/end sequence and paints the result into
//! the scene's render pass. Widget state lives with the caller; the overlay
//! only owns the egui context, its winit bridge and its wgpu painter.

mod frame;
mod overlay;
mod painter;
mod theme;

pub use frame::GuiFrame;
pub use overlay::GuiOverlay;
pub use painter::GuiPainter;
pub use theme::apply_theme;
