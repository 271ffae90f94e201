use eframe::egui::{self, Frame, Margin, RichText};

use super::{EguiApp, gauge, style};
use crate::presenter::{MitigationGuide, ResultView};

impl EguiApp {
    pub(super) fn render_results_panel(&mut self, ui: &mut egui::Ui) {
        let Some(view) = self.controller.result_view() else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("No prediction yet. Resolve a location and press Predict.")
                        .color(style::palette().text_muted),
                );
            });
            return;
        };
        egui::ScrollArea::vertical()
            .id_salt("results_scroll")
            .show(ui, |ui| {
                render_summary(ui, &view);
                ui.add_space(10.0);
                if let Some(guide) = view.mitigation {
                    render_guide(ui, guide);
                    ui.add_space(10.0);
                }
                ui.label(RichText::new("Location").strong());
                self.map.show(ui, &view.marker);
            });
    }
}

fn render_summary(ui: &mut egui::Ui, view: &ResultView) {
    ui.horizontal(|ui| {
        ui.label("Quake category:");
        ui.label(RichText::new(&view.category_text).strong().size(18.0));
    });
    ui.horizontal(|ui| {
        ui.label("Estimated magnitude:");
        ui.label(RichText::new(&view.magnitude_text).strong().size(18.0));
    });
    ui.add_space(4.0);
    ui.label("Magnitude");
    gauge::render_gauge(ui, &view.gauge);
}

fn render_guide(ui: &mut egui::Ui, guide: &MitigationGuide) {
    Frame::NONE
        .fill(style::compartment_fill())
        .stroke(style::outer_border())
        .inner_margin(Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(format!("{} ({})", guide.tier, guide.magnitude_range)).strong());
            ui.label(guide.impact);
            ui.add_space(4.0);
            ui.label(RichText::new("Mitigation").strong());
            for action in guide.actions {
                ui.label(format!("• {action}"));
            }
        });
}
