//! Sunrise/sunset times from the sunrise-sunset.org API.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

use crate::geocode::Coordinates;

const SUNRISE_SUNSET_ENDPOINT: &str = "https://api.sunrise-sunset.org/json";

/// Sunrise and sunset as UTC clock times in `h:mm:ss AM/PM` form, exactly
/// as the upstream service reports them.
#[derive(Debug, Clone)]
pub struct SunTimes {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug)]
pub enum SunTimesError {
    Network(String),
    InvalidResponse(String),
}

impl fmt::Display for SunTimesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
        }
    }
}

impl std::error::Error for SunTimesError {}

// The service reports errors as `"results": ""`, so `results` can only be
// deserialized to its real shape after the status check.
#[derive(Deserialize)]
struct SunApiResponse {
    status: String,
    #[serde(default)]
    results: serde_json::Value,
}

#[derive(Deserialize)]
struct SunApiResults {
    sunrise: String,
    sunset: String,
}

/// Client for the sunrise-sunset.org API. No credentials required.
pub struct SunTimesClient {
    endpoint: String,
}

impl SunTimesClient {
    pub fn new() -> Self {
        Self {
            endpoint: SUNRISE_SUNSET_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different base URL (local test servers).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Fetch UTC sunrise/sunset clock times for a location and date.
    pub fn fetch(&self, coords: Coordinates, date: NaiveDate) -> Result<SunTimes, SunTimesError> {
        let response = ureq::get(&self.endpoint)
            .query("lat", &coords.lat.to_string())
            .query("lng", &coords.lng.to_string())
            .query("date", &date.format("%Y-%m-%d").to_string())
            .set("User-Agent", "sundial/0.3")
            .call()
            .map_err(|e| SunTimesError::Network(e.to_string()))?;

        let parsed: SunApiResponse = response
            .into_json()
            .map_err(|e| SunTimesError::InvalidResponse(e.to_string()))?;

        extract_times(parsed)
    }
}

impl Default for SunTimesClient {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_times(response: SunApiResponse) -> Result<SunTimes, SunTimesError> {
    if response.status != "OK" {
        return Err(SunTimesError::InvalidResponse(format!(
            "service returned status '{}'",
            response.status
        )));
    }

    let results: SunApiResults = serde_json::from_value(response.results)
        .map_err(|e| SunTimesError::InvalidResponse(format!("missing sunrise/sunset: {}", e)))?;

    Ok(SunTimes {
        sunrise: results.sunrise,
        sunset: results.sunset,
    })
}
