#![deny(missing_docs)]

//! Entry point for the egui-based Quakecast UI.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use std::sync::Arc;

use eframe::egui;
use quakecast::config;
use quakecast::egui_app::controller::QuakeController;
use quakecast::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use quakecast::geocode::NominatimGeocoder;
use quakecast::logging;
use quakecast::model_setup;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size([1100.0, 760.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Quakecast",
        native_options,
        Box::new(move |_cc| match build_controller() {
            Ok(controller) => Ok(Box::new(EguiApp::new(controller))),
            Err(message) => {
                tracing::error!("{message}");
                Ok(Box::new(LaunchError { message }))
            }
        }),
    )?;
    Ok(())
}

/// Load settings and models, then wire up the controller.
fn build_controller() -> Result<QuakeController, String> {
    let settings =
        config::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
    let models = model_setup::load_models(&settings.models)
        .map_err(|err| format!("Failed to load models: {err}"))?;
    tracing::info!("Models loaded");
    let geocoder = NominatimGeocoder::new(&settings.geocoder);
    Ok(QuakeController::new(
        settings,
        Arc::new(models),
        Arc::new(geocoder),
    ))
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start");
                ui.label(&self.message);
            });
        });
    }
}
