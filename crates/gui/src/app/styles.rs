//! Application style configuration

use eframe::egui::{self, Color32, FontId, TextStyle};

use crate::state::settings::ColorSettings;

/// Dark theme tinted with the viewport colours
pub fn configure_styles(ctx: &egui::Context, colors: &ColorSettings, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::dark();

    let [r, g, b] = colors.background;
    style.visuals.panel_fill = Color32::from_rgb(r.saturating_add(4), g.saturating_add(4), b.saturating_add(6));

    // Selections take the solid colour
    let [r, g, b] = colors.solid;
    style.visuals.selection.bg_fill = Color32::from_rgb(r, g, b);

    // Disabled mode buttons must read as disabled
    style.visuals.widgets.noninteractive.fg_stroke.color = Color32::from_gray(110);

    style.spacing.button_padding = egui::vec2(8.0, 3.0);

    for (text_style, size) in [
        (TextStyle::Body, font_size),
        (TextStyle::Button, font_size),
        (TextStyle::Small, font_size * 0.85),
    ] {
        style.text_styles.insert(text_style, FontId::proportional(size));
    }

    ctx.set_style(style);
}
