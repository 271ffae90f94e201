pub(super) const MIN_MAP_ZOOM: u8 = 1;
pub(super) const MAX_MAP_ZOOM: u8 = 18;
pub(super) const MAX_GEOCODER_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

pub(super) fn default_geocoder_endpoint() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

pub(super) fn default_user_agent() -> String {
    "gempa-predictor".to_string()
}

pub(super) fn default_geocoder_max_response_bytes() -> usize {
    256 * 1024
}

pub(super) fn default_classifier_file() -> String {
    "rf_classifier.json".to_string()
}

pub(super) fn default_regressor_file() -> String {
    "linear_regression.json".to_string()
}

pub(super) fn default_label_encoder_file() -> String {
    "label_encoder.json".to_string()
}

pub(super) fn default_map_zoom() -> u8 {
    7
}

pub(super) fn default_marker_radius() -> f32 {
    10.0
}

pub(super) fn default_marker_fill_opacity() -> f32 {
    0.7
}

pub(super) fn default_tile_url() -> String {
    "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

pub(super) fn default_place_name() -> String {
    "Jakarta".to_string()
}

pub(super) fn default_latitude() -> f64 {
    -6.2
}

pub(super) fn default_longitude() -> f64 {
    106.8
}

pub(super) fn clamp_zoom(zoom: u8) -> u8 {
    zoom.clamp(MIN_MAP_ZOOM, MAX_MAP_ZOOM)
}

pub(super) fn clamp_marker_radius(radius: f32) -> f32 {
    if radius.is_finite() {
        radius.clamp(2.0, 64.0)
    } else {
        default_marker_radius()
    }
}

pub(super) fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        default_marker_fill_opacity()
    }
}

pub(super) fn clamp_latitude(latitude: f64) -> f64 {
    if latitude.is_finite() {
        latitude.clamp(-90.0, 90.0)
    } else {
        default_latitude()
    }
}

pub(super) fn clamp_longitude(longitude: f64) -> f64 {
    if longitude.is_finite() {
        longitude.clamp(-180.0, 180.0)
    } else {
        default_longitude()
    }
}
