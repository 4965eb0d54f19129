use egui::{Color32, CornerRadius, Margin, Stroke, vec2};

fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color32 {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(c(r), c(g), c(b), c(a))
}

/// Applies the overlay's dark theme: near-black panels, translucent frames,
/// a blue accent and slightly rounded widgets.
pub fn apply_theme(ctx: &egui::Context) {
    ctx.set_theme(egui::Theme::Dark);
    ctx.style_mut(|style| {
        let accent = rgba(0.33, 0.67, 0.86, 1.00);
        let v = &mut style.visuals;

        v.override_text_color = Some(rgba(1.00, 1.00, 1.00, 1.00));
        v.window_fill = rgba(0.10, 0.10, 0.10, 1.00);
        v.panel_fill = rgba(0.10, 0.10, 0.10, 1.00);
        v.extreme_bg_color = rgba(0.05, 0.05, 0.05, 0.54);
        v.faint_bg_color = rgba(1.00, 1.00, 1.00, 0.06);
        v.window_stroke = Stroke::new(1.0, rgba(0.19, 0.19, 0.19, 0.29));
        v.window_corner_radius = CornerRadius::same(7);
        v.menu_corner_radius = CornerRadius::same(4);

        v.widgets.noninteractive.bg_fill = rgba(0.10, 0.10, 0.10, 1.00);
        v.widgets.noninteractive.bg_stroke = Stroke::new(1.0, rgba(0.28, 0.28, 0.28, 0.29));

        v.widgets.inactive.bg_fill = rgba(0.05, 0.05, 0.05, 0.54);
        v.widgets.inactive.weak_bg_fill = rgba(0.05, 0.05, 0.05, 0.54);
        v.widgets.hovered.bg_fill = rgba(0.19, 0.19, 0.19, 0.54);
        v.widgets.hovered.weak_bg_fill = rgba(0.19, 0.19, 0.19, 0.54);
        v.widgets.active.bg_fill = rgba(0.20, 0.22, 0.23, 1.00);
        v.widgets.active.weak_bg_fill = rgba(0.20, 0.22, 0.23, 1.00);

        for w in [
            &mut v.widgets.inactive,
            &mut v.widgets.hovered,
            &mut v.widgets.active,
        ] {
            w.corner_radius = CornerRadius::same(3);
        }

        v.selection.bg_fill = rgba(0.20, 0.22, 0.23, 1.00);
        v.selection.stroke = Stroke::new(1.0, accent);
        v.hyperlink_color = accent;

        let s = &mut style.spacing;
        s.window_margin = Margin::same(8);
        s.button_padding = vec2(5.0, 2.0);
        s.item_spacing = vec2(6.0, 6.0);
        s.indent = 25.0;
        s.scroll.bar_width = 15.0;
    });
}
