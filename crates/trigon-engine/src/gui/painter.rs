use super::GuiFrame;

/// wgpu side of the GUI overlay.
///
/// Uploads egui textures and geometry, then draws into an already-open render
/// pass. Tied to the colour format it was created for.
pub struct GuiPainter {
    renderer: egui_wgpu::Renderer,
    format: wgpu::TextureFormat,
}

impl GuiPainter {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let renderer = egui_wgpu::Renderer::new(
            device,
            format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: true,
                ..Default::default()
            },
        );

        Self { renderer, format }
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Applies texture updates and fills the vertex/index buffers.
    ///
    /// Returns command buffers egui callbacks may have recorded; submit them
    /// before the encoder that draws the frame.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        frame: &GuiFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        self.update_textures(device, queue, frame);
        self.renderer
            .update_buffers(device, queue, encoder, &frame.primitives, &frame.screen)
    }

    /// Applies the frame's texture changes without drawing anything.
    ///
    /// egui only sends each texture delta once, so a dropped frame must still
    /// go through here.
    pub fn discard(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame: &GuiFrame) {
        self.update_textures(device, queue, frame);
        self.finish(frame);
    }

    /// Draws the prepared frame into `pass`.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'static>, frame: &GuiFrame) {
        self.renderer.render(pass, &frame.primitives, &frame.screen);
    }

    /// Releases textures egui freed this frame. Call after submission.
    pub fn finish(&mut self, frame: &GuiFrame) {
        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    fn update_textures(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame: &GuiFrame) {
        for (id, delta) in &frame.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
    }
}
