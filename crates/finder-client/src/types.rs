//! Raw shapes returned by the geocoding service.

use serde::Deserialize;

/// Google Geocoding API response envelope.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeGeometry {
    pub location: GeocodeLatLng,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeLatLng {
    pub lat: f64,
    pub lng: f64,
}
