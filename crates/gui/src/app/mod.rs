//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;

use crate::editor::Editor;
use crate::ui::{status_bar, toolbar};
use crate::viewport::ViewportPanel;

const FONT_SIZE: f32 = 14.0;

/// Desktop front end around an [`Editor`]
pub struct FootprintApp {
    editor: Editor,
    viewport: ViewportPanel,
    /// Shape store version painted last frame
    last_version: u64,
}

impl FootprintApp {
    pub fn new(cc: &eframe::CreationContext<'_>, editor: Editor) -> Self {
        styles::configure_styles(&cc.egui_ctx, &editor.settings().colors, FONT_SIZE);

        let last_version = editor.shapes().version();
        Self {
            editor,
            viewport: ViewportPanel::new(),
            last_version,
        }
    }
}

impl eframe::App for FootprintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        keyboard::handle_keyboard(ctx, &mut self.editor, &mut self.viewport);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.editor);
                menus::view_menu(ui, &mut self.viewport);
            });
        });

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.editor);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.editor);
            });

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.editor);
            });

        // Shapes changed after the panels were laid out this frame
        let version = self.editor.shapes().version();
        if version != self.last_version {
            self.last_version = version;
            ctx.request_repaint();
        }
    }
}
