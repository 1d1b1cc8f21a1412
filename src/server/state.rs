use crate::config::Credentials;
use crate::geocode::{ForwardGeocoder, ReverseGeocoder};
use crate::suntimes::SunTimesClient;

/// Shared state handed to every request handler.
///
/// All three clients are immutable once constructed; requests share
/// nothing mutable.
pub struct AppState {
    pub forward: ForwardGeocoder,
    pub reverse: ReverseGeocoder,
    pub sun: SunTimesClient,
}

impl AppState {
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self {
            forward: ForwardGeocoder::new(&credentials.opencage_key),
            reverse: ReverseGeocoder::new(&credentials.google_key),
            sun: SunTimesClient::new(),
        }
    }
}
