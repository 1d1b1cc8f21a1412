//! Core types shared by the forward and reverse geocoders.

use std::fmt;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl fmt::Display for Coordinates {
    /// `"lat,lng"`, the parameter form reverse-geocoding APIs accept.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// A place resolved to coordinates and an IANA timezone identifier.
#[derive(Debug, Clone)]
pub struct GeocodedPlace {
    pub coords: Coordinates,
    /// IANA timezone name, e.g. "Asia/Tokyo".
    pub timezone: String,
}

/// City and state/region names from reverse geocoding.
///
/// Either field may be empty when the geocoder has no matching component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceName {
    pub city: String,
    pub state: String,
}

/// Geocoding errors, forward and reverse.
#[derive(Debug)]
pub enum GeocodeError {
    /// The service answered but had no match for the query.
    NotFound(String),
    Network(String),
    InvalidResponse(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(q) => write!(f, "No geocoding match for '{}'", q),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
        }
    }
}

impl std::error::Error for GeocodeError {}
