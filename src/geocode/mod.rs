//! Geocoding subsystem.
//!
//! Forward: free-text place name → coordinates + IANA timezone (OpenCage).
//! Reverse: coordinates → city and state/region names (Google).

pub mod forward;
pub mod reverse;
pub mod types;

pub use forward::ForwardGeocoder;
pub use reverse::ReverseGeocoder;
pub use types::{Coordinates, GeocodeError, GeocodedPlace, PlaceName};
