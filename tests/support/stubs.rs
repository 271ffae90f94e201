use std::collections::HashMap;
use std::sync::Mutex;

use quakecast::geocode::{GeocodeError, Geocoder};
use quakecast::location::Coordinates;

/// Answers from a fixed table and records every query.
#[derive(Default)]
pub struct TableGeocoder {
    places: HashMap<String, (f64, f64)>,
    pub queries: Mutex<Vec<String>>,
}

impl TableGeocoder {
    pub fn with(mut self, name: &str, latitude: f64, longitude: f64) -> Self {
        self.places.insert(name.to_string(), (latitude, longitude));
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

impl Geocoder for TableGeocoder {
    fn geocode(&self, place_name: &str) -> Result<Option<Coordinates>, GeocodeError> {
        self.queries.lock().unwrap().push(place_name.to_string());
        if place_name == "offline" {
            return Err(GeocodeError::Transport("connection refused".into()));
        }
        Ok(self
            .places
            .get(place_name)
            .and_then(|&(lat, lon)| Coordinates::new(lat, lon).ok()))
    }
}
