/// Tessellated output of one GUI pass, ready to paint.
pub struct GuiFrame {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub screen: egui_wgpu::ScreenDescriptor,
}

impl GuiFrame {
    /// Tessellates a finished pass. Returns the platform output separately so
    /// the caller can hand it back to the windowing bridge.
    pub fn from_output(
        ctx: &egui::Context,
        output: egui::FullOutput,
        size_in_pixels: [u32; 2],
    ) -> (Self, egui::PlatformOutput) {
        let egui::FullOutput {
            platform_output,
            textures_delta,
            shapes,
            pixels_per_point,
            ..
        } = output;

        let primitives = ctx.tessellate(shapes, pixels_per_point);

        let frame = Self {
            primitives,
            textures_delta,
            screen: egui_wgpu::ScreenDescriptor {
                size_in_pixels,
                pixels_per_point,
            },
        };

        (frame, platform_output)
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
