//! Scene rendering.
//!
//! One fixed pipeline draws either a hard-coded triangle or a textured quad
//! from a static vertex buffer. The frame renderer records that draw and the
//! GUI overlay into a single render pass.
//!
//! Convention: scene geometry is authored directly in NDC (-1..1, +Y up).

mod frame;
mod mesh;
mod pipeline;
mod shader;
mod texture;
mod variant;

pub use frame::{FrameOutcome, FrameRenderer, FrameReport, FrameStage};
pub use mesh::{QUAD_VERTICES, SceneMesh, Vertex};
pub use pipeline::ScenePipeline;
pub use shader::{
    QUAD_SHADER_FILE, ShaderError, TRIANGLE_WGSL, load_shader_module, read_shader_source,
    shader_module_from_source,
};
pub use texture::{QuadTexture, checker_pixels};
pub use variant::SceneVariant;
