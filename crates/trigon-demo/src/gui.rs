use trigon_engine::core::{App, AppControl, FrameCtx};
use trigon_engine::input::{InputEvent, InputState, MouseButton};
use trigon_engine::time::FrameStats;

/// Widget state of the demo overlay, owned by the app and passed to `layout`
/// every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoGuiState {
    pub value: f32,
    pub counter: u32,
    pub show_demo_window: bool,
    pub show_another_window: bool,
    /// Scene clear colour, RGB in 0..=1.
    pub clear_color: [f32; 3],
}

impl Default for DemoGuiState {
    fn default() -> Self {
        Self {
            value: 0.0,
            counter: 0,
            show_demo_window: true,
            show_another_window: false,
            clear_color: [0.45, 0.55, 0.60],
        }
    }
}

/// Screen rects of the clickable widgets placed by the last `layout` call.
#[derive(Debug, Default, Copy, Clone)]
pub struct DemoLayout {
    pub button: Option<egui::Rect>,
    pub close: Option<egui::Rect>,
}

impl DemoGuiState {
    /// Lays out the demo windows for one GUI pass.
    pub fn layout(&mut self, ctx: &egui::Context, stats: &FrameStats) -> DemoLayout {
        let mut placed = DemoLayout::default();

        egui::Window::new("Hello, world!").show(ctx, |ui| {
            ui.label("This is some useful text.");
            ui.checkbox(&mut self.show_demo_window, "Demo Window");
            ui.checkbox(&mut self.show_another_window, "Another Window");

            ui.add(egui::Slider::new(&mut self.value, 0.0..=1.0).text("float"));
            ui.horizontal(|ui| {
                ui.color_edit_button_rgb(&mut self.clear_color);
                ui.label("clear color");
            });

            ui.horizontal(|ui| {
                let button = ui.button("Button");
                placed.button = Some(button.rect);
                if button.clicked() {
                    self.press_button();
                }
                ui.label(format!("counter = {}", self.counter));
            });

            ui.label(format!(
                "Application average {:.3} ms/frame ({:.1} FPS)",
                stats.avg_frame_ms, stats.fps
            ));
        });

        if self.show_demo_window {
            egui::Window::new("Demo Window")
                .open(&mut self.show_demo_window)
                .show(ctx, |ui| ctx.settings_ui(ui));
        }

        if self.show_another_window {
            let mut close = false;
            egui::Window::new("Another Window").show(ctx, |ui| {
                ui.label("Hello from another window!");
                let button = ui.button("Close Me");
                placed.close = Some(button.rect);
                close = button.clicked();
            });
            if close {
                self.show_another_window = false;
            }
        }

        placed
    }

    pub fn press_button(&mut self) {
        self.counter += 1;
    }

    pub fn clear(&self) -> wgpu::Color {
        let [r, g, b] = self.clear_color;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }
}

/// Draws the overlay and drives the clear colour from it.
#[derive(Debug, Default)]
pub struct DemoApp {
    pub state: DemoGuiState,
}

impl App for DemoApp {
    fn on_input(&mut self, event: &InputEvent, state: &InputState) -> AppControl {
        if let InputEvent::PointerMoved(_) = event {
            if state.button_down(MouseButton::Left) {
                log::trace!("scene drag at {:?}", state.pointer_pos);
            }
        } else {
            log::trace!("scene input: {event:?}");
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        self.state.layout(ctx.gui, &ctx.time.stats);
        ctx.clear = self.state.clear();
        AppControl::Continue
    }
}
