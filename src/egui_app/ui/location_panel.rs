use eframe::egui::{self, RichText};

use super::{EguiApp, style};
use crate::egui_app::state::{LocationMode, LookupState};

impl EguiApp {
    pub(super) fn render_location_panel(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Location").strong());
        let mut mode = self.controller.ui.location.mode;
        ui.horizontal(|ui| {
            ui.radio_value(&mut mode, LocationMode::PlaceName, "Place name");
            ui.radio_value(&mut mode, LocationMode::Manual, "Manual coordinates");
        });
        self.controller.set_location_mode(mode);
        ui.add_space(4.0);
        match mode {
            LocationMode::PlaceName => self.render_place_input(ui),
            LocationMode::Manual => self.render_manual_input(ui),
        }
    }

    fn render_place_input(&mut self, ui: &mut egui::Ui) {
        let mut place_name = self.controller.ui.location.place_name.clone();
        let mut submit = false;
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut place_name)
                    .hint_text("City or region, e.g. Jakarta")
                    .desired_width(ui.available_width() - 60.0),
            );
            submit |= response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let pending = self.controller.is_lookup_pending();
            submit |= ui
                .add_enabled(!pending, egui::Button::new("Find"))
                .clicked();
        });
        self.controller.set_place_name(&place_name);
        if submit {
            self.controller.lookup_place();
        }

        if let LookupState::Pending { place_name } = &self.controller.ui.location.lookup {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Looking up {place_name}…"));
            });
        } else if let Some((level, text)) = self.controller.location_notice() {
            ui.label(RichText::new(text).color(style::notice_color(level)));
        }
    }

    fn render_manual_input(&mut self, ui: &mut egui::Ui) {
        let mut latitude = self.controller.ui.location.manual_latitude;
        let mut longitude = self.controller.ui.location.manual_longitude;
        egui::Grid::new("manual_coordinates")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label("Latitude");
                ui.add(
                    egui::DragValue::new(&mut latitude)
                        .range(-90.0..=90.0)
                        .speed(0.01)
                        .fixed_decimals(4),
                );
                ui.end_row();
                ui.label("Longitude");
                ui.add(
                    egui::DragValue::new(&mut longitude)
                        .range(-180.0..=180.0)
                        .speed(0.01)
                        .fixed_decimals(4),
                );
                ui.end_row();
            });
        self.controller.set_manual_coordinates(latitude, longitude);
    }
}
