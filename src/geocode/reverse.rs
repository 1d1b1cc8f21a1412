//! Reverse geocoding via the Google Geocoding API.
//!
//! Resolves coordinates to a city and state/region name. Callers treat
//! every error from this module as advisory: a request can complete
//! without a place name.

use serde::Deserialize;

use super::types::{Coordinates, GeocodeError, PlaceName};

const GOOGLE_GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Deserialize)]
struct ReverseResponse {
    status: String,
    #[serde(default)]
    results: Vec<ReverseResult>,
}

#[derive(Deserialize)]
struct ReverseResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Deserialize)]
struct AddressComponent {
    long_name: String,
    short_name: String,
    types: Vec<String>,
}

/// Client for the Google reverse-geocoding API.
pub struct ReverseGeocoder {
    api_key: String,
    endpoint: String,
}

impl ReverseGeocoder {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            endpoint: GOOGLE_GEOCODE_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different base URL (local test servers).
    pub fn with_endpoint(api_key: &str, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.to_string(),
            endpoint: endpoint.into(),
        }
    }

    /// Resolve coordinates to city and state names.
    ///
    /// A non-`"OK"` upstream status maps to `GeocodeError::NotFound`;
    /// transport failures map to `Network`. Either way the fields of a
    /// successful answer may still be empty when no matching address
    /// component exists.
    pub fn describe(&self, coords: Coordinates) -> Result<PlaceName, GeocodeError> {
        let response = ureq::get(&self.endpoint)
            .query("latlng", &coords.to_string())
            .query("key", &self.api_key)
            .set("User-Agent", "sundial/0.3")
            .call()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let parsed: ReverseResponse = response
            .into_json()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        if parsed.status != "OK" {
            return Err(GeocodeError::NotFound(format!(
                "reverse geocoder status '{}'",
                parsed.status
            )));
        }

        Ok(scan_components(parsed.results.first()))
    }
}

/// Scan the first result's address components in array order.
///
/// A `locality` component supplies the city (full name) and an
/// `administrative_area_level_1` component supplies the state
/// (abbreviated name). A later match overwrites an earlier one.
fn scan_components(result: Option<&ReverseResult>) -> PlaceName {
    let mut name = PlaceName::default();
    let Some(result) = result else {
        return name;
    };

    for component in &result.address_components {
        if component.types.iter().any(|t| t == "locality") {
            name.city = component.long_name.clone();
        }
        if component.types.iter().any(|t| t == "administrative_area_level_1") {
            name.state = component.short_name.clone();
        }
    }
    name
}
