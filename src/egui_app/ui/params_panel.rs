use eframe::egui::{self, RichText};

use super::{EguiApp, style};
use crate::params::PARAM_SPECS;

impl EguiApp {
    pub(super) fn render_params_panel(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Source parameters").strong());
        egui::CollapsingHeader::new("What do these mean?")
            .id_salt("param_help")
            .default_open(false)
            .show(ui, |ui| {
                for spec in &PARAM_SPECS {
                    ui.label(RichText::new(spec.label).strong());
                    ui.label(RichText::new(spec.help).color(style::palette().text_muted));
                }
            });
        ui.add_space(4.0);

        let mut params = self.controller.ui.params;
        for (spec, value) in params.fields_mut() {
            ui.add(
                egui::Slider::new(value, spec.range())
                    .text(spec.label)
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text(spec.help);
        }
        if params != self.controller.ui.params {
            self.controller.set_parameters(params);
        }
    }

    pub(super) fn render_predict_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(RichText::new("Predict").strong())
            .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add(button).clicked() {
            // Failures are reported through the status bar and inline message.
            let _ = self.controller.predict();
        }
        if let Some(message) = &self.controller.ui.predict_error {
            ui.label(RichText::new(message).color(style::palette().error));
        }
    }
}
