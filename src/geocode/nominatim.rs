//! Nominatim (OpenStreetMap) search API client.

use serde::Deserialize;
use url::Url;

use crate::config::GeocoderSettings;
use crate::http_client;
use crate::location::Coordinates;

use super::{GeocodeError, Geocoder};

const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Blocking geocoder backed by a Nominatim-compatible `/search` endpoint.
#[derive(Clone, Debug)]
pub struct NominatimGeocoder {
    endpoint: String,
    user_agent: String,
    max_response_bytes: usize,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(settings: &GeocoderSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            user_agent: settings.user_agent.clone(),
            max_response_bytes: settings.max_response_bytes,
        }
    }

    fn search_url(&self, place_name: &str) -> Result<Url, GeocodeError> {
        Url::parse_with_params(
            &self.endpoint,
            &[("q", place_name), ("format", "json"), ("limit", "1")],
        )
        .map_err(|err| GeocodeError::InvalidRequest(format!("{}: {err}", self.endpoint)))
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, place_name: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let url = self.search_url(place_name)?;
        tracing::debug!("Geocoding request {url}");
        let response = match http_client::agent()
            .get(url.as_str())
            .set("User-Agent", &self.user_agent)
            .set("Accept", "application/json")
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = http_client::read_response_text(response, MAX_ERROR_BODY_BYTES)
                    .unwrap_or_else(|err| err.to_string());
                return Err(GeocodeError::Status { code, body });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(GeocodeError::Transport(err.to_string()));
            }
        };
        let body = http_client::read_response_text(response, self.max_response_bytes)
            .map_err(|err| GeocodeError::InvalidResponse(err.to_string()))?;
        parse_search_response(&body)
    }
}

fn parse_search_response(body: &str) -> Result<Option<Coordinates>, GeocodeError> {
    let hits: Vec<SearchHit> = serde_json::from_str(body.trim())
        .map_err(|err| GeocodeError::InvalidResponse(err.to_string()))?;
    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };
    let latitude = parse_degrees("lat", &hit.lat)?;
    let longitude = parse_degrees("lon", &hit.lon)?;
    if let Some(name) = hit.display_name.as_deref() {
        tracing::debug!("Best geocoding match: {name}");
    }
    Coordinates::new(latitude, longitude)
        .map(Some)
        .map_err(|err| GeocodeError::InvalidResponse(err.to_string()))
}

fn parse_degrees(field: &str, raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| GeocodeError::InvalidResponse(format!("{field} {raw:?}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_server::{json_response, serve_once};

    fn geocoder_for(base_url: &str) -> NominatimGeocoder {
        NominatimGeocoder::new(&GeocoderSettings {
            endpoint: format!("{base_url}/search"),
            ..GeocoderSettings::default()
        })
    }

    #[test]
    fn parses_first_hit() {
        let body = r#"[{"lat":"-6.1753942","lon":"106.827183","display_name":"Jakarta, Indonesia"},
                       {"lat":"1.0","lon":"2.0"}]"#;
        let coords = parse_search_response(body).unwrap().unwrap();
        assert!((coords.latitude() + 6.2).abs() < 0.05);
        assert!((coords.longitude() - 106.8).abs() < 0.05);
    }

    #[test]
    fn empty_array_is_not_found() {
        assert_eq!(parse_search_response("[]").unwrap(), None);
    }

    #[test]
    fn malformed_coordinates_are_invalid_response() {
        let err = parse_search_response(r#"[{"lat":"north","lon":"1"}]"#).unwrap_err();
        assert!(matches!(err, GeocodeError::InvalidResponse(_)));
        let err = parse_search_response(r#"[{"lat":"95.0","lon":"1"}]"#).unwrap_err();
        assert!(matches!(err, GeocodeError::InvalidResponse(_)));
    }

    #[test]
    fn search_url_encodes_query() {
        let geocoder = geocoder_for("http://localhost:1");
        let url = geocoder.search_url("Banda Aceh").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:1/search?q=Banda+Aceh&format=json&limit=1"
        );
    }

    #[test]
    fn lookup_against_local_server() {
        let base = serve_once(json_response(
            "200 OK",
            r#"[{"lat":"-0.9471","lon":"100.4172"}]"#,
        ));
        let coords = geocoder_for(&base).geocode("Padang").unwrap().unwrap();
        assert_eq!(coords, Coordinates::new(-0.9471, 100.4172).unwrap());
    }

    #[test]
    fn server_error_maps_to_status() {
        let base = serve_once(json_response("503 Service Unavailable", "busy"));
        let err = geocoder_for(&base).geocode("Padang").unwrap_err();
        assert!(matches!(err, GeocodeError::Status { code: 503, .. }));
    }
}
