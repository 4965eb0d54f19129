use crate::time::FrameTime;

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    /// GUI context for this frame; widgets are laid out against it.
    pub gui: &'a egui::Context,
    pub time: FrameTime,
    /// Clear colour for the scene pass. Starts at the previous frame's value.
    pub clear: wgpu::Color,
}
