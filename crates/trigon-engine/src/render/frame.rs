use std::path::Path;

use crate::device::{GpuFrame, GraphicsContext, PresentationSurface, SurfaceErrorAction};
use crate::error::InitError;
use crate::gui::{GuiFrame, GuiPainter};

use super::{
    QUAD_SHADER_FILE, QuadTexture, SceneMesh, ScenePipeline, SceneVariant, TRIANGLE_WGSL,
    load_shader_module, shader_module_from_source,
};

/// Position of a frame in the per-frame sequence.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum FrameStage {
    #[default]
    Idle,
    AcquiringFrame,
    Recording,
    Submitted,
    Presented,
}

/// What one frame actually did.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameReport {
    /// Last stage reached.
    pub stage: FrameStage,
    /// Render passes opened with a clear load op.
    pub clears: u32,
    /// Scene draw calls issued.
    pub draws: u32,
    /// Vertices submitted across scene draw calls.
    pub vertices: u32,
    /// GUI clipped primitives painted into the pass.
    pub gui_primitives: usize,
    pub submitted: bool,
    /// An explicit present call was issued.
    pub presented: bool,
    /// The acquired texture no longer matches the surface; reconfigure.
    pub suboptimal: bool,
}

impl FrameReport {
    /// Records the outcome of the present step. `Presented` is only reached
    /// when a present call was actually made.
    pub fn mark_presented(&mut self, presented: bool) {
        self.presented = presented;
        if presented {
            self.stage = FrameStage::Presented;
        }
    }
}

/// Result of a surface frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Rendered(FrameReport),
    /// Nothing was drawn; the action tells the loop whether to keep going.
    Skipped(SurfaceErrorAction),
}

/// Records the scene draw and the GUI overlay into one render pass per frame.
///
/// Can only be built once a context and a target format exist, so no draw is
/// ever issued before the pipeline does.
pub struct FrameRenderer {
    pipeline: ScenePipeline,
    mesh: SceneMesh,
    texture: Option<QuadTexture>,
}

impl FrameRenderer {
    /// Loads the variant's shader, builds the pipeline and uploads geometry.
    ///
    /// The quad shader is read from `resource_dir`; the triangle shader is
    /// embedded.
    pub fn new(
        ctx: &GraphicsContext,
        variant: SceneVariant,
        format: wgpu::TextureFormat,
        resource_dir: &Path,
    ) -> Result<Self, InitError> {
        let device = ctx.device();

        let shader = match variant {
            SceneVariant::Triangle => {
                shader_module_from_source(device, "triangle.wgsl", TRIANGLE_WGSL)?
            }
            SceneVariant::Quad => load_shader_module(device, &resource_dir.join(QUAD_SHADER_FILE))?,
        };

        let pipeline = ScenePipeline::build(device, &shader, format, variant)?;
        let mesh = SceneMesh::new(device, variant);
        let texture = pipeline
            .bind_group_layout()
            .map(|layout| QuadTexture::checker(device, ctx.queue(), layout));

        Ok(Self {
            pipeline,
            mesh,
            texture,
        })
    }

    /// Keeps the pipeline's target format in step with the surface.
    pub fn ensure_format(
        &mut self,
        ctx: &GraphicsContext,
        format: wgpu::TextureFormat,
    ) -> Result<bool, InitError> {
        self.pipeline.ensure_format(ctx.device(), format)
    }

    /// Runs one full surface frame: acquire, record, submit, present, poll.
    ///
    /// A skipped frame still applies the GUI's texture changes.
    pub fn render(
        &mut self,
        ctx: &GraphicsContext,
        surface: &mut PresentationSurface,
        clear: wgpu::Color,
        gui: Option<(&mut GuiPainter, &GuiFrame)>,
    ) -> FrameOutcome {
        let frame = match self.begin_surface_frame(ctx, surface) {
            Ok(frame) => frame,
            Err(action) => {
                if let Some((painter, frame)) = gui {
                    painter.discard(ctx.device(), ctx.queue(), frame);
                }
                return FrameOutcome::Skipped(action);
            }
        };

        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        let suboptimal = surface_texture.suboptimal;

        let mut report = self.record_and_submit(ctx, encoder, &view, clear, gui);
        drop(view);

        report.mark_presented(surface.present(surface_texture));
        if suboptimal {
            log::debug!("surface texture is suboptimal");
            report.suboptimal = true;
        }
        log::trace!("frame: {report:?}");

        ctx.poll();
        FrameOutcome::Rendered(report)
    }

    /// Renders one frame into an arbitrary target view. Nothing is presented.
    pub fn render_offscreen(
        &self,
        ctx: &GraphicsContext,
        target: &wgpu::TextureView,
        clear: wgpu::Color,
        gui: Option<(&mut GuiPainter, &GuiFrame)>,
    ) -> FrameReport {
        let encoder = ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("trigon offscreen encoder"),
            });

        let report = self.record_and_submit(ctx, encoder, target, clear, gui);
        ctx.poll();
        report
    }

    /// Records the single render pass: clear, scene draw, GUI overlay.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clear: wgpu::Color,
        gui: Option<(&GuiPainter, &GuiFrame)>,
        report: &mut FrameReport,
    ) {
        // egui-wgpu draws into a `RenderPass<'static>`; the pass is ended
        // before the encoder is touched again.
        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("trigon frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();
        report.clears += 1;

        pass.set_pipeline(self.pipeline.raw());
        if let Some(texture) = &self.texture {
            pass.set_bind_group(0, texture.bind_group(), &[]);
        }
        if let Some(vbo) = self.mesh.buffer() {
            pass.set_vertex_buffer(0, vbo.slice(..));
        }

        let count = self.mesh.vertex_count();
        pass.draw(0..count, 0..1);
        report.draws += 1;
        report.vertices += count;

        if let Some((painter, frame)) = gui {
            if !frame.is_empty() {
                painter.render(&mut pass, frame);
                report.gui_primitives += frame.primitives.len();
            }
        }
    }

    fn begin_surface_frame(
        &mut self,
        ctx: &GraphicsContext,
        surface: &mut PresentationSurface,
    ) -> Result<GpuFrame, SurfaceErrorAction> {
        if !surface.is_drawable() {
            return Err(SurfaceErrorAction::SkipFrame);
        }

        if let Err(e) = self.ensure_format(ctx, surface.format()) {
            log::error!("cannot match pipeline to surface format: {e}");
            return Err(SurfaceErrorAction::Fatal);
        }

        log::trace!("frame: {:?}", FrameStage::AcquiringFrame);
        surface.acquire(ctx).map_err(|err| {
            log::warn!("failed to acquire surface texture: {err}");
            surface.handle_surface_error(ctx, err)
        })
    }

    fn record_and_submit(
        &self,
        ctx: &GraphicsContext,
        mut encoder: wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clear: wgpu::Color,
        mut gui: Option<(&mut GuiPainter, &GuiFrame)>,
    ) -> FrameReport {
        let mut report = FrameReport {
            stage: FrameStage::Recording,
            ..FrameReport::default()
        };

        let gui_commands = match gui.as_mut() {
            Some((painter, frame)) => painter.prepare(ctx.device(), ctx.queue(), &mut encoder, *frame),
            None => Vec::new(),
        };

        let gui_ref = gui.as_ref().map(|(painter, frame)| (&**painter, *frame));
        self.encode(&mut encoder, target, clear, gui_ref, &mut report);

        ctx.queue()
            .submit(gui_commands.into_iter().chain(std::iter::once(encoder.finish())));
        report.submitted = true;
        report.stage = FrameStage::Submitted;

        if let Some((painter, frame)) = gui {
            painter.finish(frame);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::device::GpuInit;

    const SIZE: u32 = 512;
    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    fn resource_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../resources")
    }

    fn target(ctx: &GraphicsContext) -> wgpu::Texture {
        ctx.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("test target"),
            size: wgpu::Extent3d {
                width: SIZE,
                height: SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        })
    }

    /// Two consecutive GUI passes. A new egui window is invisible while it
    /// sizes itself, so only the second pass paints; the first carries the
    /// font atlas upload.
    fn gui_frames() -> (GuiFrame, GuiFrame) {
        let ctx = egui::Context::default();
        let pass = || {
            let input = egui::RawInput {
                screen_rect: Some(egui::Rect::from_min_size(
                    egui::Pos2::ZERO,
                    egui::vec2(SIZE as f32, SIZE as f32),
                )),
                ..Default::default()
            };
            let output = ctx.run(input, |ctx| {
                egui::Window::new("Hello, world!").show(ctx, |ui| {
                    ui.label("This is some useful text.");
                });
            });
            GuiFrame::from_output(&ctx, output, [SIZE, SIZE]).0
        };

        let first = pass();
        let second = pass();
        (first, second)
    }

    fn read_pixel(ctx: &GraphicsContext, texture: &wgpu::Texture, x: u32, y: u32) -> [u8; 4] {
        let bytes_per_row = SIZE * 4;
        let buffer = ctx.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback"),
            size: (bytes_per_row * SIZE) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        encoder.copy_texture_to_buffer(
            texture.as_image_copy(),
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(SIZE),
                },
            },
            texture.size(),
        );
        ctx.queue().submit(std::iter::once(encoder.finish()));

        let slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |r| {
            tx.send(r).ok();
        });
        ctx.device()
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: None,
            })
            .expect("poll");
        rx.recv().expect("map callback").expect("map");

        let data = slice.get_mapped_range();
        let i = (y * bytes_per_row + x * 4) as usize;
        [data[i], data[i + 1], data[i + 2], data[i + 3]]
    }

    #[test]
    fn triangle_frame_clears_draws_three_and_submits() {
        let Ok(ctx) = GraphicsContext::new(&GpuInit::default()) else {
            eprintln!("no GPU adapter available; skipping");
            return;
        };

        let renderer = FrameRenderer::new(&ctx, SceneVariant::Triangle, FORMAT, &resource_dir())
            .expect("renderer");
        let texture = target(&ctx);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let report = renderer.render_offscreen(&ctx, &view, wgpu::Color::BLUE, None);

        assert_eq!(report.clears, 1);
        assert_eq!(report.draws, 1);
        assert_eq!(report.vertices, 3);
        assert!(report.submitted);
        assert!(!report.presented);
        assert_eq!(report.stage, FrameStage::Submitted);

        // Centre lies inside the triangle, the top-left corner does not.
        assert_eq!(read_pixel(&ctx, &texture, SIZE / 2, SIZE * 3 / 5), [255, 0, 0, 255]);
        assert_eq!(read_pixel(&ctx, &texture, 0, 0), [0, 0, 255, 255]);
    }

    #[test]
    fn quad_frame_with_gui_overlay() {
        let Ok(ctx) = GraphicsContext::new(&GpuInit::default()) else {
            eprintln!("no GPU adapter available; skipping");
            return;
        };

        let renderer = FrameRenderer::new(&ctx, SceneVariant::Quad, FORMAT, &resource_dir())
            .expect("renderer");
        let mut painter = GuiPainter::new(ctx.device(), FORMAT);
        let (sizing, gui) = gui_frames();
        assert!(sizing.is_empty());
        assert!(!sizing.textures_delta.set.is_empty());
        assert!(!gui.is_empty());
        painter.discard(ctx.device(), ctx.queue(), &sizing);

        let texture = target(&ctx);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let report = renderer.render_offscreen(
            &ctx,
            &view,
            wgpu::Color::BLACK,
            Some((&mut painter, &gui)),
        );

        assert_eq!(report.clears, 1);
        assert_eq!(report.vertices, 6);
        assert_eq!(report.gui_primitives, gui.primitives.len());
        assert!(report.submitted);
        assert!(!report.suboptimal);
    }

    #[test]
    fn empty_gui_frame_is_not_painted() {
        let Ok(ctx) = GraphicsContext::new(&GpuInit::default()) else {
            eprintln!("no GPU adapter available; skipping");
            return;
        };

        let renderer = FrameRenderer::new(&ctx, SceneVariant::Triangle, FORMAT, &resource_dir())
            .expect("renderer");
        let mut painter = GuiPainter::new(ctx.device(), FORMAT);
        let (sizing, _) = gui_frames();

        let texture = target(&ctx);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let report = renderer.render_offscreen(
            &ctx,
            &view,
            wgpu::Color::BLACK,
            Some((&mut painter, &sizing)),
        );

        assert_eq!(report.gui_primitives, 0);
        assert_eq!(report.draws, 1);
    }

    #[test]
    fn stage_reaches_presented_only_with_a_present_call() {
        let mut report = FrameReport {
            stage: FrameStage::Submitted,
            submitted: true,
            ..FrameReport::default()
        };
        report.mark_presented(false);
        assert_eq!(report.stage, FrameStage::Submitted);
        assert!(!report.presented);

        report.mark_presented(true);
        assert_eq!(report.stage, FrameStage::Presented);
        assert!(report.presented);
    }

    #[test]
    fn quad_without_shader_file_fails_at_startup() {
        let Ok(ctx) = GraphicsContext::new(&GpuInit::default()) else {
            eprintln!("no GPU adapter available; skipping");
            return;
        };

        let empty = tempfile::tempdir().expect("tempdir");
        let result = FrameRenderer::new(&ctx, SceneVariant::Quad, FORMAT, empty.path());
        assert!(matches!(
            result,
            Err(InitError::Shader(crate::render::ShaderError::NotFound(_)))
        ));
    }
}
