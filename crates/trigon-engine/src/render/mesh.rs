use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::SceneVariant;

/// Interleaved scene vertex: NDC position + texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x2  // tex_coord
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const fn v(position: [f32; 2], tex_coord: [f32; 2]) -> Vertex {
    Vertex {
        position,
        tex_coord,
    }
}

/// Full-viewport quad as two counter-clockwise triangles.
pub const QUAD_VERTICES: [Vertex; 6] = [
    v([-1.0, -1.0], [0.0, 0.0]),
    v([1.0, -1.0], [1.0, 0.0]),
    v([1.0, 1.0], [1.0, 1.0]),
    v([-1.0, -1.0], [0.0, 0.0]),
    v([1.0, 1.0], [1.0, 1.0]),
    v([-1.0, 1.0], [0.0, 1.0]),
];

/// Write-once scene geometry.
///
/// The triangle variant has no buffer: its shader derives positions from the
/// vertex index.
pub struct SceneMesh {
    buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
}

impl SceneMesh {
    pub fn new(device: &wgpu::Device, variant: SceneVariant) -> Self {
        match variant {
            SceneVariant::Triangle => Self {
                buffer: None,
                vertex_count: variant.vertex_count(),
            },
            SceneVariant::Quad => Self::from_vertices(device, &QUAD_VERTICES),
        }
    }

    /// Uploads `vertices` into an immutable vertex buffer.
    pub fn from_vertices(device: &wgpu::Device, vertices: &[Vertex]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("trigon scene vbo"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            buffer: Some(buffer),
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}
