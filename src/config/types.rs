use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults::{
    MAX_GEOCODER_RESPONSE_BYTES, clamp_latitude, clamp_longitude, clamp_marker_radius,
    clamp_opacity, clamp_zoom, default_classifier_file, default_geocoder_endpoint,
    default_geocoder_max_response_bytes, default_label_encoder_file, default_latitude,
    default_longitude, default_map_zoom, default_marker_fill_opacity, default_marker_radius,
    default_place_name, default_regressor_file, default_tile_url, default_user_agent,
};

/// Settings loaded from `config.toml`.
///
/// Config keys (TOML): `geocoder`, `models`, `map`, `location`. Every key is
/// optional; missing keys fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub models: ModelSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub location: LocationSettings,
}

impl AppConfig {
    /// Clamp out-of-range values loaded from disk.
    pub fn normalized(mut self) -> Self {
        self.geocoder.max_response_bytes = self
            .geocoder
            .max_response_bytes
            .clamp(1024, MAX_GEOCODER_RESPONSE_BYTES);
        if self.geocoder.user_agent.trim().is_empty() {
            self.geocoder.user_agent = default_user_agent();
        }
        self.map.zoom = clamp_zoom(self.map.zoom);
        self.map.marker_radius = clamp_marker_radius(self.map.marker_radius);
        self.map.marker_fill_opacity = clamp_opacity(self.map.marker_fill_opacity);
        self.location.default_latitude = clamp_latitude(self.location.default_latitude);
        self.location.default_longitude = clamp_longitude(self.location.default_longitude);
        self
    }
}

/// Place-name lookup service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocoderSettings {
    /// Nominatim-compatible search endpoint.
    #[serde(default = "default_geocoder_endpoint")]
    pub endpoint: String,
    /// User agent sent with every lookup, as required by the public Nominatim policy.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_geocoder_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_geocoder_endpoint(),
            user_agent: default_user_agent(),
            max_response_bytes: default_geocoder_max_response_bytes(),
        }
    }
}

/// Where the pretrained model artifacts are read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Optional override for the models directory; defaults to `.quakecast/models`.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_classifier_file")]
    pub classifier_file: String,
    #[serde(default = "default_regressor_file")]
    pub regressor_file: String,
    #[serde(default = "default_label_encoder_file")]
    pub label_encoder_file: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            dir: None,
            classifier_file: default_classifier_file(),
            regressor_file: default_regressor_file(),
            label_encoder_file: default_label_encoder_file(),
        }
    }
}

/// Result map appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    #[serde(default = "default_map_zoom")]
    pub zoom: u8,
    /// Marker radius in screen points.
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f32,
    #[serde(default = "default_marker_fill_opacity")]
    pub marker_fill_opacity: f32,
    /// Raster tile URL template with `{z}`, `{x}` and `{y}` placeholders.
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            zoom: default_map_zoom(),
            marker_radius: default_marker_radius(),
            marker_fill_opacity: default_marker_fill_opacity(),
            tile_url: default_tile_url(),
        }
    }
}

/// Initial values of the location inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSettings {
    #[serde(default = "default_place_name")]
    pub default_place_name: String,
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            default_place_name: default_place_name(),
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
        }
    }
}
