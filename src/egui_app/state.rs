//! Shared state types for the egui UI.

use crate::config::AppConfig;
use crate::location::{Coordinates, Resolution};
use crate::params::SourceParameters;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub location: LocationFormState,
    pub params: SourceParameters,
    /// Inline message shown under the predict button after a refused prediction.
    pub predict_error: Option<String>,
}

impl UiState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            status: StatusBarState::idle(),
            location: LocationFormState {
                mode: LocationMode::PlaceName,
                place_name: config.location.default_place_name.clone(),
                manual_latitude: config.location.default_latitude,
                manual_longitude: config.location.default_longitude,
                lookup: LookupState::Idle,
            },
            params: SourceParameters::default(),
            predict_error: None,
        }
    }
}

/// Which location input is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationMode {
    PlaceName,
    Manual,
}

/// Place-name lookup progress.
#[derive(Clone, Debug, PartialEq)]
pub enum LookupState {
    /// No lookup since the place name last changed.
    Idle,
    Pending { place_name: String },
    Done(Resolution),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocationFormState {
    pub mode: LocationMode,
    pub place_name: String,
    pub manual_latitude: f64,
    pub manual_longitude: f64,
    pub lookup: LookupState,
}

impl LocationFormState {
    /// Coordinates the predict action may use, if the active mode has any.
    pub fn resolved(&self) -> Option<Coordinates> {
        match self.mode {
            LocationMode::PlaceName => match &self.lookup {
                LookupState::Done(resolution) => resolution.coordinates(),
                LookupState::Idle | LookupState::Pending { .. } => None,
            },
            LocationMode::Manual => {
                Coordinates::new(self.manual_latitude, self.manual_longitude).ok()
            }
        }
    }
}

/// Status tone used for the footer badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub tone: StatusTone,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Enter a location and source parameters, then predict".into(),
            tone: StatusTone::Idle,
        }
    }

    pub fn badge_label(&self) -> &'static str {
        match self.tone {
            StatusTone::Idle => "Idle",
            StatusTone::Busy => "Working",
            StatusTone::Info => "Info",
            StatusTone::Warning => "Warning",
            StatusTone::Error => "Error",
        }
    }
}
