//! Event handlers that drive the form, the predict action and the result slot.

mod jobs;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::egui_app::state::{LocationMode, LookupState, StatusTone, UiState};
use crate::geocode::Geocoder;
use crate::location::{Coordinates, NoticeLevel, Resolution};
use crate::ml::SeverityModel;
use crate::params::SourceParameters;
use crate::prediction::{self, PredictError, PredictionResult, ResultSlot};
use crate::presenter::{self, ResultView};

use jobs::{ControllerJobs, JobMessage};

/// Maintains app state and bridges the prediction pipeline to the egui UI.
pub struct QuakeController {
    pub ui: UiState,
    settings: AppConfig,
    model: Arc<dyn SeverityModel>,
    geocoder: Arc<dyn Geocoder>,
    results: ResultSlot,
    jobs: ControllerJobs,
}

impl QuakeController {
    pub fn new(
        settings: AppConfig,
        model: Arc<dyn SeverityModel>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Self {
        Self {
            ui: UiState::from_config(&settings),
            settings,
            model,
            geocoder,
            results: ResultSlot::default(),
            jobs: ControllerJobs::default(),
        }
    }

    pub fn settings(&self) -> &AppConfig {
        &self.settings
    }

    /// Switch between place-name and manual input.
    pub fn set_location_mode(&mut self, mode: LocationMode) {
        if self.ui.location.mode == mode {
            return;
        }
        self.ui.location.mode = mode;
        self.ui.predict_error = None;
    }

    /// Record an edit to the place name. Any earlier resolution no longer applies.
    pub fn set_place_name(&mut self, name: &str) {
        if self.ui.location.place_name == name {
            return;
        }
        self.ui.location.place_name = name.to_string();
        self.ui.location.lookup = LookupState::Idle;
        self.jobs.cancel_lookup();
    }

    /// Geocode the current place name on a worker thread.
    pub fn lookup_place(&mut self) {
        let place_name = self.ui.location.place_name.trim().to_string();
        if place_name.is_empty() {
            self.jobs.cancel_lookup();
            self.ui.location.lookup = LookupState::Done(Resolution::Skipped);
            return;
        }
        self.jobs.spawn_geocode(Arc::clone(&self.geocoder), place_name.clone());
        self.set_status(format!("Looking up {place_name}…"), StatusTone::Busy);
        self.ui.location.lookup = LookupState::Pending { place_name };
    }

    pub fn is_lookup_pending(&self) -> bool {
        self.jobs.lookup_pending()
    }

    /// Set manual coordinates, clamped to geographic bounds.
    pub fn set_manual_coordinates(&mut self, latitude: f64, longitude: f64) {
        let location = &mut self.ui.location;
        if latitude.is_finite() {
            location.manual_latitude = latitude.clamp(-90.0, 90.0);
        }
        if longitude.is_finite() {
            location.manual_longitude = longitude.clamp(-180.0, 180.0);
        }
    }

    pub fn set_parameters(&mut self, params: SourceParameters) {
        self.ui.params =
            SourceParameters::clamped(params.depth, params.strike, params.dip, params.rake);
    }

    /// Apply finished background work. Returns whether anything changed.
    pub fn poll_background_jobs(&mut self) -> bool {
        let mut changed = false;
        while let Some(message) = self.jobs.try_recv() {
            match message {
                JobMessage::Geocoded(result) => {
                    self.apply_resolution(result.resolution);
                    changed = true;
                }
            }
        }
        changed
    }

    fn apply_resolution(&mut self, resolution: Resolution) {
        match resolution.notice() {
            Some((NoticeLevel::Success, text)) => self.set_status(text, StatusTone::Info),
            Some((NoticeLevel::Warning, text)) => self.set_status(text, StatusTone::Warning),
            Some((NoticeLevel::Error, text)) => self.set_status(text, StatusTone::Error),
            None => {}
        }
        self.ui.location.lookup = LookupState::Done(resolution);
    }

    /// Coordinates available to the predict action right now.
    pub fn resolved_coordinates(&self) -> Option<Coordinates> {
        self.ui.location.resolved()
    }

    /// Message describing the last place-name lookup, shown under the input.
    pub fn location_notice(&self) -> Option<(NoticeLevel, String)> {
        match (&self.ui.location.mode, &self.ui.location.lookup) {
            (LocationMode::PlaceName, LookupState::Done(resolution)) => resolution.notice(),
            _ => None,
        }
    }

    /// Handle the predict button.
    pub fn predict(&mut self) -> Result<(), PredictError> {
        let coordinates = self.resolved_coordinates();
        let params = self.ui.params;
        match prediction::predict(self.model.as_ref(), coordinates, &params, &mut self.results) {
            Ok(result) => {
                let text = format!(
                    "Predicted {} (magnitude {})",
                    result.category,
                    presenter::format_magnitude(result.magnitude)
                );
                self.ui.predict_error = None;
                self.set_status(text, StatusTone::Info);
                Ok(())
            }
            Err(err) => {
                match &err {
                    PredictError::CoordinatesUnavailable => {
                        tracing::warn!("Prediction refused: {err}")
                    }
                    PredictError::Model(_) => tracing::error!("{err}"),
                }
                self.ui.predict_error = Some(err.to_string());
                self.set_status(err.to_string(), StatusTone::Error);
                Err(err)
            }
        }
    }

    pub fn current_result(&self) -> Option<&PredictionResult> {
        self.results.current()
    }

    /// Presentation of the stored result, if any.
    pub fn result_view(&self) -> Option<ResultView> {
        self.results
            .current()
            .map(|result| presenter::result_view(result, &self.settings.map))
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.text = text.into();
        self.ui.status.tone = tone;
    }
}
