use crate::error::InitError;

use super::{QuadTexture, SceneVariant, Vertex};

/// The single scene pipeline.
///
/// Immutable once compiled; tracks the colour format it targets and is rebuilt
/// through `ensure_format` when the surface format changes.
pub struct ScenePipeline {
    pipeline: wgpu::RenderPipeline,
    format: wgpu::TextureFormat,
    variant: SceneVariant,

    shader: wgpu::ShaderModule,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
}

impl ScenePipeline {
    /// Compiles `shader` (entry points `vs_main`/`fs_main`) for `format`.
    pub fn build(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        variant: SceneVariant,
    ) -> Result<Self, InitError> {
        log::info!("creating {variant} render pipeline for {format:?}");

        let bind_group_layout = match variant {
            SceneVariant::Triangle => None,
            SceneVariant::Quad => Some(QuadTexture::bind_group_layout(device)),
        };

        let pipeline = compile(device, shader, format, variant, bind_group_layout.as_ref())?;

        Ok(Self {
            pipeline,
            format,
            variant,
            shader: shader.clone(),
            bind_group_layout,
        })
    }

    /// Rebuilds the pipeline if `format` differs from the one it targets.
    ///
    /// Returns whether a rebuild happened. The bind group layout is kept, so
    /// bind groups created against it stay valid.
    pub fn ensure_format(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
    ) -> Result<bool, InitError> {
        if self.format == format {
            return Ok(false);
        }

        log::info!("rebuilding {} pipeline: {:?} -> {:?}", self.variant, self.format, format);
        self.pipeline = compile(
            device,
            &self.shader,
            format,
            self.variant,
            self.bind_group_layout.as_ref(),
        )?;
        self.format = format;
        Ok(true)
    }

    pub fn raw(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn variant(&self) -> SceneVariant {
        self.variant
    }

    /// Layout for group 0; `None` for the triangle, which binds nothing.
    pub fn bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.bind_group_layout.as_ref()
    }
}

fn compile(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    variant: SceneVariant,
    bind_group_layout: Option<&wgpu::BindGroupLayout>,
) -> Result<wgpu::RenderPipeline, InitError> {
    let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = bind_group_layout.into_iter().collect();

    let vertex_buffers = match variant {
        SceneVariant::Triangle => vec![],
        SceneVariant::Quad => vec![Vertex::layout()],
    };

    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("trigon scene pipeline layout"),
        bind_group_layouts: &bind_group_layouts,
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("trigon scene pipeline"),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &vertex_buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    match pollster::block_on(device.pop_error_scope()) {
        None => Ok(pipeline),
        Some(err) => Err(InitError::Pipeline(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{GpuInit, GraphicsContext};
    use crate::render::{TRIANGLE_WGSL, shader_module_from_source};

    fn headless() -> Option<GraphicsContext> {
        GraphicsContext::new(&GpuInit::default()).ok()
    }

    #[test]
    fn triangle_pipeline_compiles_and_rebuilds_on_format_change() {
        let Some(ctx) = headless() else {
            eprintln!("no GPU adapter available; skipping");
            return;
        };

        let shader = shader_module_from_source(ctx.device(), "triangle", TRIANGLE_WGSL)
            .expect("embedded shader compiles");
        let mut pipeline = ScenePipeline::build(
            ctx.device(),
            &shader,
            wgpu::TextureFormat::Bgra8UnormSrgb,
            SceneVariant::Triangle,
        )
        .expect("pipeline");

        assert!(pipeline.bind_group_layout().is_none());
        assert!(!pipeline.ensure_format(ctx.device(), wgpu::TextureFormat::Bgra8UnormSrgb).unwrap());
        assert!(pipeline.ensure_format(ctx.device(), wgpu::TextureFormat::Rgba8Unorm).unwrap());
        assert_eq!(pipeline.format(), wgpu::TextureFormat::Rgba8Unorm);
    }

    #[test]
    fn mismatched_entry_points_fail_to_build() {
        let Some(ctx) = headless() else {
            eprintln!("no GPU adapter available; skipping");
            return;
        };

        // Valid WGSL, but there is no `fs_main` entry point.
        let src = "@vertex fn vs_main() -> @builtin(position) vec4<f32> { return vec4<f32>(0.0); }";
        let shader = shader_module_from_source(ctx.device(), "vs-only", src).expect("compiles");

        let result = ScenePipeline::build(
            ctx.device(),
            &shader,
            wgpu::TextureFormat::Bgra8UnormSrgb,
            SceneVariant::Quad,
        );
        assert!(matches!(result, Err(InitError::Pipeline(_))));
    }
}
