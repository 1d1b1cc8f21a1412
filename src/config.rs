//! Credential configuration for the upstream services.
//!
//! Keys are read once at startup into an explicit [`Credentials`] value
//! that is handed to each client. No globals.

use std::fmt;

/// API credentials sourced from the process environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// OpenCage forward-geocoding key.
    pub opencage_key: String,
    /// Google reverse-geocoding key.
    pub google_key: String,
    /// OpenWeather key. Reserved: loaded when present, consumed by nothing.
    pub openweather_key: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVar(var) => write!(f, "Missing environment variable: {}", var),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Credentials {
    /// Load credentials from the process environment, reading a `.env`
    /// file first if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::build(|var| std::env::var(var))
    }

    // Factored over a lookup function so tests drive it from a map
    // instead of mutating the process environment.
    fn build<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let require = |var: &str| lookup(var).map_err(|_| ConfigError::MissingVar(var.to_string()));

        Ok(Self {
            opencage_key: require("OPENCAGE_API_KEY")?,
            google_key: require("GOOGLE_API_KEY")?,
            openweather_key: lookup("OPENWEATHER_API_KEY").ok(),
        })
    }
}
