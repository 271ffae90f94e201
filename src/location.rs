//! Turning a place name or manual input into validated coordinates.

use std::fmt;

use crate::geocode::Geocoder;

/// A latitude/longitude pair known to be finite and within geographic bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

/// Rejected coordinate input.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("Latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("Longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

impl Coordinates {
    /// Validate a raw latitude/longitude pair.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// How the user describes the location. Only one mode is active at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum LocationQuery {
    PlaceName(String),
    Manual { latitude: f64, longitude: f64 },
}

/// Outcome of resolving a [`LocationQuery`].
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Resolved(Coordinates),
    /// The place name was blank, so nothing was looked up.
    Skipped,
    NotFound,
    Failed(String),
}

/// Severity of the message shown for a resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl Resolution {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::Resolved(coords) => Some(*coords),
            _ => None,
        }
    }

    /// User-facing message for the outcome, if any.
    pub fn notice(&self) -> Option<(NoticeLevel, String)> {
        match self {
            Self::Resolved(coords) => Some((
                NoticeLevel::Success,
                format!("Coordinates found: {coords}"),
            )),
            Self::Skipped => None,
            Self::NotFound => Some((NoticeLevel::Warning, "Location not found.".to_string())),
            Self::Failed(message) => Some((
                NoticeLevel::Error,
                format!("Failed to get coordinates: {message}"),
            )),
        }
    }
}

/// Resolve a location query, consulting the geocoder at most once.
///
/// Geocoder failures are folded into [`Resolution::Failed`]; they never escape.
pub fn resolve(query: &LocationQuery, geocoder: &dyn Geocoder) -> Resolution {
    match query {
        LocationQuery::Manual {
            latitude,
            longitude,
        } => match Coordinates::new(*latitude, *longitude) {
            Ok(coords) => Resolution::Resolved(coords),
            Err(err) => Resolution::Failed(err.to_string()),
        },
        LocationQuery::PlaceName(name) => {
            let name = name.trim();
            if name.is_empty() {
                return Resolution::Skipped;
            }
            match geocoder.geocode(name) {
                Ok(Some(coords)) => {
                    tracing::info!("Resolved {name:?} to {coords}");
                    Resolution::Resolved(coords)
                }
                Ok(None) => {
                    tracing::warn!("No geocoding match for {name:?}");
                    Resolution::NotFound
                }
                Err(err) => {
                    tracing::warn!("Geocoding {name:?} failed: {err}");
                    Resolution::Failed(err.to_string())
                }
            }
        }
    }
}
