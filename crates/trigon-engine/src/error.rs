use crate::render::ShaderError;

/// Startup failure, tagged with the stage that failed.
///
/// Every stage is attempted exactly once; the caller decides whether to abort.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to find a suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create wgpu device/queue: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to create wgpu surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("selected adapter cannot present to this window")]
    SurfaceUnsupported,

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("render pipeline failed to compile: {0}")]
    Pipeline(String),
}
