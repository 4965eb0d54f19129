use winit::event::WindowEvent;
use winit::window::Window;

use crate::device::GraphicsContext;

use super::{GuiFrame, GuiPainter, apply_theme};

/// egui context + winit bridge + wgpu painter for one window.
pub struct GuiOverlay {
    state: egui_winit::State,
    painter: GuiPainter,
}

impl GuiOverlay {
    /// Creates the GUI context for `window`, painting into `format` targets.
    pub fn new(ctx: &GraphicsContext, format: wgpu::TextureFormat, window: &Window) -> Self {
        log::info!("initializing GUI overlay for {format:?}");

        let egui_ctx = egui::Context::default();
        apply_theme(&egui_ctx);

        let max_texture_side = ctx.device().limits().max_texture_dimension_2d as usize;
        let state = egui_winit::State::new(
            egui_ctx,
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(max_texture_side),
        );

        Self {
            state,
            painter: GuiPainter::new(ctx.device(), format),
        }
    }

    /// Recreates the overlay when the surface format changed.
    ///
    /// A fresh egui context is needed so the font atlas is uploaded again to
    /// the new painter. Caller-owned widget state is unaffected.
    pub fn ensure_format(
        &mut self,
        ctx: &GraphicsContext,
        format: wgpu::TextureFormat,
        window: &Window,
    ) -> bool {
        if self.painter.format() == format {
            return false;
        }
        *self = Self::new(ctx, format, window);
        true
    }

    /// Forwards a window event. Returns `true` when the GUI consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Runs one begin → layout → end pass and tessellates the result.
    pub fn run<F>(&mut self, window: &Window, layout: F) -> GuiFrame
    where
        F: FnOnce(&egui::Context),
    {
        let raw_input = self.state.take_egui_input(window);
        let ctx = self.state.egui_ctx().clone();

        ctx.begin_pass(raw_input);
        layout(&ctx);
        let output = ctx.end_pass();

        let size = window.inner_size();
        let (frame, platform_output) =
            GuiFrame::from_output(&ctx, output, [size.width, size.height]);
        self.state.handle_platform_output(window, platform_output);

        frame
    }

    pub fn painter_mut(&mut self) -> &mut GuiPainter {
        &mut self.painter
    }
}
