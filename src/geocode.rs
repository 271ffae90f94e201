//! Place-name lookup behind a narrow capability trait.

mod nominatim;

pub use nominatim::NominatimGeocoder;

use crate::location::Coordinates;

/// Errors raised by a geocoding backend.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Service returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Resolves free-text place names to coordinates.
///
/// `Ok(None)` means the service answered but found nothing.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, place_name: &str) -> Result<Option<Coordinates>, GeocodeError>;
}
