mod support;

use support::{quakecast_env::QuakecastEnvGuard, stubs::TableGeocoder};

use quakecast::config;
use quakecast::egui_app::controller::QuakeController;
use quakecast::egui_app::state::{LocationMode, StatusTone};
use quakecast::model_setup;
use quakecast::presenter::MarkerColor;
use std::{sync::Arc, time::Duration};
use tempfile::TempDir;

struct ControllerHarness {
    _config: QuakecastEnvGuard,
    _temp: TempDir,
    geocoder: Arc<TableGeocoder>,
    pub controller: QuakeController,
}

impl ControllerHarness {
    fn new() -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let config_home = temp.path().join("config");
        std::fs::create_dir_all(&config_home).expect("create config dir");
        let env = QuakecastEnvGuard::set_config_home(config_home);

        let settings = config::load_or_default().expect("load config");
        let models = model_setup::load_models(&settings.models).expect("load models");
        let geocoder = Arc::new(TableGeocoder::default().with("Jakarta", -6.2, 106.8));
        let controller = QuakeController::new(settings, Arc::new(models), geocoder.clone());
        Self {
            _config: env,
            _temp: temp,
            geocoder,
            controller,
        }
    }

    fn settle(&mut self) {
        for _ in 0..400 {
            self.controller.poll_background_jobs();
            if !self.controller.is_lookup_pending() {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("lookup did not settle");
    }
}

#[test]
fn first_run_writes_config_and_models() {
    let harness = ControllerHarness::new();
    let root = harness._temp.path().join("config").join(".quakecast");

    assert!(root.join(config::CONFIG_FILE_NAME).is_file());
    assert!(root.join("models").join("rf_classifier.json").is_file());
    assert!(root.join("models").join("label_encoder.json").is_file());
    assert!(root.join("models").join("linear_regression.json").is_file());
}

#[test]
fn default_place_resolves_and_predicts() {
    let mut harness = ControllerHarness::new();
    harness.controller.lookup_place();
    harness.settle();

    assert_eq!(harness.controller.ui.status.tone, StatusTone::Info);
    assert_eq!(
        harness.controller.ui.status.text,
        "Coordinates found: (-6.2000, 106.8000)"
    );
    harness.controller.predict().expect("predict");

    let view = harness.controller.result_view().expect("result");
    assert_eq!(view.category_text, "Moderate");
    assert_eq!(view.magnitude_text, "5.47");
    assert_eq!(view.marker.color, MarkerColor::Orange);
    assert_eq!(view.marker.zoom, 7);
    assert_eq!(harness.geocoder.query_count(), 1);
}

#[test]
fn unknown_place_refuses_prediction() {
    let mut harness = ControllerHarness::new();
    harness.controller.set_place_name("Atlantis");
    harness.controller.lookup_place();
    harness.settle();

    assert!(harness.controller.predict().is_err());
    assert_eq!(harness.controller.ui.status.tone, StatusTone::Error);
    assert!(harness.controller.result_view().is_none());
}

#[test]
fn manual_entry_skips_geocoder() {
    let mut harness = ControllerHarness::new();
    harness.controller.set_location_mode(LocationMode::Manual);
    harness.controller.set_manual_coordinates(35.68, 139.69);
    harness.controller.predict().expect("predict");

    let result = harness.controller.current_result().expect("result");
    assert_eq!((result.latitude, result.longitude), (35.68, 139.69));
    assert_eq!(harness.geocoder.query_count(), 0);
}
