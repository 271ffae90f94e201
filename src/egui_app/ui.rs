//! egui renderer for the application UI.

mod gauge;
mod location_panel;
mod map_view;
mod params_panel;
mod results_panel;
pub mod style;

use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{self, Frame, Margin, RichText, TopBottomPanel};

use crate::egui_app::controller::QuakeController;
use crate::map::OsmTileSource;

use map_view::MapView;

/// Minimum window size that still fits the form beside the results.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(760.0, 560.0);
const FORM_PANEL_WIDTH: f32 = 340.0;
const BACKGROUND_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: QuakeController,
    map: MapView,
    visuals_set: bool,
}

impl EguiApp {
    /// Wrap a controller and start resolving the default place name.
    pub fn new(mut controller: QuakeController) -> Self {
        let map_settings = &controller.settings().map;
        let tiles = OsmTileSource::new(
            map_settings.tile_url.clone(),
            controller.settings().geocoder.user_agent.clone(),
        );
        controller.lookup_place();
        Self {
            controller,
            map: MapView::new(Arc::new(tiles)),
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                Frame::NONE
                    .fill(style::palette().bg_primary)
                    .inner_margin(Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.heading("Earthquake Severity Predictor");
                ui.label(
                    RichText::new(
                        "Estimate the severity category and magnitude of an earthquake \
                         from its location and fault geometry.",
                    )
                    .color(style::palette().text_muted),
                );
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::NONE
                    .fill(style::palette().bg_primary)
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    let (badge, _) =
                        ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(badge.center(), 6.0, style::status_color(status.tone));
                    ui.label(status.badge_label());
                    ui.separator();
                    ui.label(&status.text);
                    if self.controller.is_lookup_pending() || self.map.is_loading() {
                        ui.spinner();
                    }
                });
            });
    }

    fn render_form(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("form_panel")
            .resizable(false)
            .exact_width(FORM_PANEL_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("form_scroll")
                    .show(ui, |ui| {
                        self.render_location_panel(ui);
                        ui.add_space(12.0);
                        self.render_params_panel(ui);
                        ui.add_space(12.0);
                        self.render_predict_button(ui);
                    });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        let mut changed = self.controller.poll_background_jobs();
        changed |= self.map.poll_tiles(ctx);
        self.render_header(ctx);
        self.render_status(ctx);
        self.render_form(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_results_panel(ui);
        });
        if changed {
            ctx.request_repaint();
        } else if self.controller.is_lookup_pending() || self.map.is_loading() {
            ctx.request_repaint_after(BACKGROUND_POLL_INTERVAL);
        }
    }
}
