use std::io;
use std::path::{Path, PathBuf};

/// Embedded source of the triangle scene.
pub const TRIANGLE_WGSL: &str = include_str!("shaders/triangle.wgsl");

/// File name of the quad scene shader inside the resource directory.
pub const QUAD_SHADER_FILE: &str = "quad.wgsl";

/// Shader loading/compilation failure.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("shader file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read shader file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("shader `{label}` failed to compile: {message}")]
    Compile { label: String, message: String },
}

/// Reads a UTF-8 shader source file.
pub fn read_shader_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ShaderError::NotFound(path.to_path_buf()),
        _ => ShaderError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Loads a WGSL file and compiles it into a shader module.
pub fn load_shader_module(
    device: &wgpu::Device,
    path: &Path,
) -> Result<wgpu::ShaderModule, ShaderError> {
    let source = read_shader_source(path)?;
    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    log::debug!("loaded shader {} ({} bytes)", path.display(), source.len());
    shader_module_from_source(device, &label, &source)
}

/// Compiles WGSL source, surfacing validation errors instead of routing them
/// to the uncaptured-error handler.
pub fn shader_module_from_source(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    match pollster::block_on(device.pop_error_scope()) {
        None => Ok(module),
        Some(err) => Err(ShaderError::Compile {
            label: label.to_string(),
            message: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::device::{GpuInit, GraphicsContext};

    #[test]
    fn missing_file_is_reported_not_panicked() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("does-not-exist.wgsl");

        match read_shader_source(&path) {
            Err(ShaderError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn reads_source_verbatim() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "{TRIANGLE_WGSL}").expect("write");

        let src = read_shader_source(file.path()).expect("read");
        assert_eq!(src, TRIANGLE_WGSL);
    }

    #[test]
    fn embedded_triangle_declares_both_stages() {
        assert!(TRIANGLE_WGSL.contains("fn vs_main"));
        assert!(TRIANGLE_WGSL.contains("fn fs_main"));
    }

    #[test]
    fn missing_file_yields_no_module() {
        let Ok(ctx) = GraphicsContext::new(&GpuInit::default()) else {
            eprintln!("no GPU adapter available; skipping");
            return;
        };

        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_shader_module(ctx.device(), &dir.path().join(QUAD_SHADER_FILE));
        assert!(matches!(result, Err(ShaderError::NotFound(_))));
    }

    #[test]
    fn invalid_wgsl_is_a_compile_error() {
        let Ok(ctx) = GraphicsContext::new(&GpuInit::default()) else {
            eprintln!("no GPU adapter available; skipping");
            return;
        };

        let result = shader_module_from_source(ctx.device(), "broken", "fn vs_main( {");
        assert!(matches!(result, Err(ShaderError::Compile { .. })));
    }
}
