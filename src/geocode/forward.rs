//! Forward geocoding via the OpenCage API.
//!
//! Resolves a free-text place name to coordinates plus the IANA timezone
//! OpenCage annotates its results with.

use serde::Deserialize;

use super::types::{Coordinates, GeocodeError, GeocodedPlace};

const OPENCAGE_ENDPOINT: &str = "https://api.opencagedata.com/geocode/v1/json";

#[derive(Deserialize)]
struct OpenCageResponse {
    #[serde(default)]
    results: Vec<OpenCageResult>,
}

#[derive(Deserialize)]
struct OpenCageResult {
    geometry: Geometry,
    annotations: Annotations,
}

#[derive(Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct Annotations {
    timezone: TimezoneAnnotation,
}

#[derive(Deserialize)]
struct TimezoneAnnotation {
    name: String,
}

/// Client for the OpenCage forward-geocoding API.
pub struct ForwardGeocoder {
    api_key: String,
    endpoint: String,
}

impl ForwardGeocoder {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            endpoint: OPENCAGE_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different base URL (local test servers).
    pub fn with_endpoint(api_key: &str, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.to_string(),
            endpoint: endpoint.into(),
        }
    }

    /// Resolve a place name to coordinates and a timezone identifier.
    ///
    /// Returns `GeocodeError::NotFound` when the service has no match,
    /// `Network` on transport failures or non-2xx answers, and
    /// `InvalidResponse` when a 2xx body is missing the expected fields.
    pub fn resolve(&self, place: &str) -> Result<GeocodedPlace, GeocodeError> {
        let response = ureq::get(&self.endpoint)
            .query("q", place)
            .query("key", &self.api_key)
            .set("User-Agent", "sundial/0.3")
            .call()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let parsed: OpenCageResponse = response
            .into_json()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        first_match(parsed, place)
    }
}

/// Take the top result. OpenCage orders results by its own relevance
/// ranking; the first entry is the match.
fn first_match(response: OpenCageResponse, place: &str) -> Result<GeocodedPlace, GeocodeError> {
    let top = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NotFound(place.to_string()))?;

    Ok(GeocodedPlace {
        coords: Coordinates {
            lat: top.geometry.lat,
            lng: top.geometry.lng,
        },
        timezone: top.annotations.timezone.name,
    })
}
