use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::error::InitError;

use super::{GpuFrame, GpuInit, GraphicsContext, SurfaceErrorAction};

/// Result of a resize request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResizeOutcome {
    /// Zero-area size (e.g. minimized); nothing was configured.
    Skipped,
    /// Surface was configured. `format_changed` tells dependents to rebuild.
    Reconfigured { format_changed: bool },
}

/// Binds a window to a presentable wgpu surface.
///
/// Holds the negotiated format and the current size. Depends on the
/// `GraphicsContext` that created it for its lifetime.
pub struct PresentationSurface {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels. May be zero while minimized.
    size: PhysicalSize<u32>,
}

impl PresentationSurface {
    /// Creates the surface, selects a format and configures it at the window's
    /// current framebuffer size.
    pub fn create(
        ctx: &GraphicsContext,
        window: Arc<Window>,
        init: &GpuInit,
    ) -> Result<Self, InitError> {
        log::info!("creating surface...");
        let surface = ctx.instance().create_surface(Arc::clone(&window))?;

        if !ctx.adapter().is_surface_supported(&surface) {
            return Err(InitError::SurfaceUnsupported);
        }

        let caps = surface.get_capabilities(ctx.adapter());
        let format = choose_surface_format(&caps.formats).ok_or(InitError::NoSurfaceFormat)?;
        let alpha_mode = choose_alpha_mode(&caps, init.alpha_mode);

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        if is_drawable(size) {
            surface.configure(ctx.device(), &config);
        }

        log::info!(
            "surface created: {:?} {}x{}",
            config.format,
            size.width,
            size.height
        );

        Ok(Self {
            window,
            surface,
            config,
            size,
        })
    }

    /// Returns the active surface format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns `false` while the window has a zero-area framebuffer.
    pub fn is_drawable(&self) -> bool {
        is_drawable(self.size)
    }

    /// Reconfigures the surface for `new_size`.
    ///
    /// Capabilities are re-queried so a format change is picked up; the caller
    /// must rebuild anything tied to the old format when told it changed.
    /// A zero width or height is a no-op.
    pub fn resize(&mut self, ctx: &GraphicsContext, new_size: PhysicalSize<u32>) -> ResizeOutcome {
        self.size = new_size;

        let caps = self.surface.get_capabilities(ctx.adapter());
        let format = choose_surface_format(&caps.formats).unwrap_or(self.config.format);

        let Some(config) = resized_config(&self.config, new_size, format) else {
            log::debug!("resize to {}x{} ignored", new_size.width, new_size.height);
            return ResizeOutcome::Skipped;
        };

        let format_changed = config.format != self.config.format;
        if format_changed {
            log::info!(
                "surface format changed: {:?} -> {:?}",
                self.config.format,
                config.format
            );
        }

        self.config = config;
        self.surface.configure(ctx.device(), &self.config);

        ResizeOutcome::Reconfigured { format_changed }
    }

    /// Acquires the next surface texture and creates an encoder.
    pub fn acquire(&self, ctx: &GraphicsContext) -> Result<GpuFrame, wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("trigon frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Presents an acquired texture.
    ///
    /// Returns whether an explicit present was issued. On the web the browser
    /// presents implicitly once the texture is released.
    pub fn present(&self, surface_texture: wgpu::SurfaceTexture) -> bool {
        self.window.pre_present_notify();

        #[cfg(not(target_arch = "wasm32"))]
        surface_texture.present();

        #[cfg(target_arch = "wasm32")]
        drop(surface_texture);

        cfg!(not(target_arch = "wasm32"))
    }

    /// Handles a failed acquisition, reconfiguring when the surface went stale.
    pub fn handle_surface_error(
        &mut self,
        ctx: &GraphicsContext,
        err: wgpu::SurfaceError,
    ) -> SurfaceErrorAction {
        let action = SurfaceErrorAction::classify(&err);
        if action == SurfaceErrorAction::Reconfigured && self.is_drawable() {
            self.surface.configure(ctx.device(), &self.config);
        }
        action
    }
}

fn is_drawable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

/// Picks the first format the adapter reports for this surface.
pub fn choose_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats.first().copied()
}

fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Computes the configuration to apply after a resize.
///
/// wgpu rejects zero-sized surfaces, so a zero width or height yields `None`
/// and the surface must be left untouched.
pub fn resized_config(
    current: &wgpu::SurfaceConfiguration,
    new_size: PhysicalSize<u32>,
    format: wgpu::TextureFormat,
) -> Option<wgpu::SurfaceConfiguration> {
    if !is_drawable(new_size) {
        return None;
    }

    let mut config = current.clone();
    config.width = new_size.width;
    config.height = new_size.height;
    config.format = format;
    Some(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: wgpu::TextureFormat::Bgra8UnormSrgb,
            width: 512,
            height: 512,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    #[test]
    fn zero_dimension_resize_is_ignored() {
        let cfg = base_config();
        let fmt = cfg.format;
        assert!(resized_config(&cfg, PhysicalSize::new(0, 0), fmt).is_none());
        assert!(resized_config(&cfg, PhysicalSize::new(0, 300), fmt).is_none());
        assert!(resized_config(&cfg, PhysicalSize::new(640, 0), fmt).is_none());
    }

    #[test]
    fn positive_resize_updates_dimensions_only() {
        let cfg = base_config();
        let next = resized_config(&cfg, PhysicalSize::new(1024, 768), cfg.format)
            .expect("non-zero size must configure");

        assert_eq!((next.width, next.height), (1024, 768));
        assert_eq!(next.format, cfg.format);
        assert_eq!(next.present_mode, cfg.present_mode);
    }

    #[test]
    fn tiny_sizes_still_configure() {
        let cfg = base_config();
        let next = resized_config(&cfg, PhysicalSize::new(1, 1), cfg.format);
        assert!(next.is_some());
    }

    #[test]
    fn resize_carries_new_format() {
        let cfg = base_config();
        let next = resized_config(
            &cfg,
            PhysicalSize::new(512, 512),
            wgpu::TextureFormat::Rgba8Unorm,
        )
        .expect("configure");
        assert_eq!(next.format, wgpu::TextureFormat::Rgba8Unorm);
    }

    #[test]
    fn first_reported_format_wins() {
        let formats = [
            wgpu::TextureFormat::Rgba16Float,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ];
        assert_eq!(
            choose_surface_format(&formats),
            Some(wgpu::TextureFormat::Rgba16Float)
        );
        assert_eq!(choose_surface_format(&[]), None);
    }
}
