use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{
    GpuInit, GraphicsContext, PresentationSurface, ResizeOutcome, SurfaceErrorAction,
};
use crate::error::InitError;
use crate::gui::GuiOverlay;
use crate::input::InputState;
use crate::input::platform::translate_window_event;
use crate::render::{FrameOutcome, FrameRenderer, SceneVariant};
use crate::time::FrameClock;

/// Resource directory shipped with the workspace (holds `quad.wgsl`).
pub fn default_resource_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../resources"))
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub variant: SceneVariant,
    pub resource_dir: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "WebGPU window".to_string(),
            initial_size: LogicalSize::new(512.0, 512.0),
            variant: SceneVariant::default(),
            resource_dir: default_resource_dir(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives frames until it closes.
    ///
    /// Startup failures (window, device, surface, pipeline) end the loop and
    /// come back as the error.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Everything tied to the single window. Fields drop top to bottom, so the
/// GPU objects go before the device and the window.
struct WindowEntry {
    gui: GuiOverlay,
    renderer: FrameRenderer,
    surface: PresentationSurface,
    context: GraphicsContext,

    input: InputState,
    clock: FrameClock,
    clear: wgpu::Color,

    window: Arc<Window>,
}

impl WindowEntry {
    /// Startup sequence: window, device, surface, pipeline, GUI.
    fn create(
        event_loop: &ActiveEventLoop,
        config: &RuntimeConfig,
        gpu_init: &GpuInit,
    ) -> Result<Self> {
        log::info!("creating window...");
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);
        let window = event_loop
            .create_window(attrs)
            .map_err(InitError::from)
            .context("failed to create window")?;
        let window = Arc::new(window);

        let context = GraphicsContext::new(gpu_init).context("GPU initialization failed")?;

        let surface = PresentationSurface::create(&context, Arc::clone(&window), gpu_init)
            .context("surface creation failed")?;

        let renderer = FrameRenderer::new(
            &context,
            config.variant,
            surface.format(),
            &config.resource_dir,
        )
        .context("render pipeline creation failed")?;

        let gui = GuiOverlay::new(&context, surface.format(), &window);

        log::info!("startup complete: {} scene", config.variant);

        Ok(Self {
            gui,
            renderer,
            surface,
            context,
            input: InputState::default(),
            clock: FrameClock::default(),
            clear: wgpu::Color::BLACK,
            window,
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) -> Result<()> {
        if let ResizeOutcome::Reconfigured {
            format_changed: true,
        } = self.surface.resize(&self.context, new_size)
        {
            let format = self.surface.format();
            self.renderer
                .ensure_format(&self.context, format)
                .context("pipeline rebuild after format change failed")?;
            self.gui.ensure_format(&self.context, format, &self.window);
        }

        self.clock.reset();
        self.window.request_redraw();
        Ok(())
    }

    /// Lays out the GUI through the app, then renders and presents one frame.
    fn redraw<A: CoreApp>(&mut self, app: &mut A) -> Result<AppControl> {
        if !self.surface.is_drawable() {
            return Ok(AppControl::Continue);
        }

        let time = self.clock.tick();
        let mut clear = self.clear;
        let mut control = AppControl::Continue;

        let gui_frame = self.gui.run(&self.window, |gui| {
            let mut ctx = FrameCtx { gui, time, clear };
            control = app.on_frame(&mut ctx);
            clear = ctx.clear;
        });
        self.clear = clear;

        let outcome = self.renderer.render(
            &self.context,
            &mut self.surface,
            clear,
            Some((self.gui.painter_mut(), &gui_frame)),
        );

        match outcome {
            FrameOutcome::Rendered(report) => {
                log::trace!("{report:?}");
                if report.suboptimal {
                    self.resize(self.window.inner_size())?;
                }
            }
            FrameOutcome::Skipped(SurfaceErrorAction::Fatal) => {
                anyhow::bail!("surface can no longer be rendered to")
            }
            FrameOutcome::Skipped(action) => log::debug!("frame skipped: {action:?}"),
        }

        Ok(control)
    }
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    error: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            error: None,
            exit_requested: false,
        }
    }

    /// Stores `error` for `Runtime::run` to return; the caller reports it.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        self.error = Some(error);
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        match WindowEntry::create(event_loop, &self.config, &self.gpu_init) {
            Ok(entry) => {
                entry.window.request_redraw();
                self.entry = Some(entry);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the overlay shows a live frame rate.
        if let Some(entry) = &self.entry {
            entry.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.window.id() != window_id {
            return;
        }

        // The GUI sees every event first; the app only gets what it left.
        let consumed = entry.gui.on_window_event(&entry.window, &event);
        if !consumed {
            if let Some(ev) =
                translate_window_event(entry.window.scale_factor(), &entry.input, &event)
            {
                entry.input.apply_event(&ev);
                if self.app.on_input(&ev, &entry.input) == AppControl::Exit {
                    self.exit_requested = true;
                }
            }
        }

        let result = match &event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.exit_requested = true;
                Ok(())
            }

            WindowEvent::Resized(new_size) => entry.resize(*new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.window.inner_size();
                entry.resize(new_size)
            }

            WindowEvent::RedrawRequested => match entry.redraw(&mut self.app) {
                Ok(AppControl::Exit) => {
                    self.exit_requested = true;
                    Ok(())
                }
                Ok(AppControl::Continue) => Ok(()),
                Err(e) => Err(e),
            },

            _ => Ok(()),
        };

        if let Err(e) = result {
            self.fail(event_loop, e);
            return;
        }

        if self.exit_requested {
            // Release GPU objects while the window still exists.
            self.entry = None;
            event_loop.exit();
        }
    }
}
