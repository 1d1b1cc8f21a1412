use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::geocode::{GeocodeError, PlaceName};
use crate::localtime::{self, ConvertError};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(ErrorBody { error: self.1 })).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

const MISSING_PARAMS: &str = "Date and country are required parameters.";
const GEOCODE_FAILED: &str = "Unable to geocode the selected country";

// ─── GET /get_sunrise_sunset ─────────────────────────────────────

#[derive(Deserialize)]
pub struct SunriseSunsetQuery {
    pub date: Option<String>,
    pub country: Option<String>,
}

#[derive(Serialize)]
pub struct SunriseSunsetResponse {
    pub sunrise: String,
    pub sunset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

pub async fn sunrise_sunset(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SunriseSunsetQuery>,
) -> Result<Json<SunriseSunsetResponse>, Response> {
    let start = Instant::now();

    let (date_raw, country) = match (params.date.as_deref(), params.country.as_deref()) {
        (Some(d), Some(c)) if !d.trim().is_empty() && !c.trim().is_empty() => {
            (d.trim(), c.trim())
        }
        _ => return Err(api_error(StatusCode::BAD_REQUEST, MISSING_PARAMS).into_response()),
    };

    // The date is parsed here rather than passed through because the
    // local-time conversion needs the calendar day for DST-correct offsets.
    let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d").map_err(|e| {
        api_error(
            StatusCode::BAD_REQUEST,
            format!("Invalid date '{}': {}", date_raw, e),
        )
        .into_response()
    })?;

    // A zero-result geocode keeps the 200 status; existing clients of this
    // endpoint key off the error field, not the status code.
    let place = match state.forward.resolve(country) {
        Ok(place) => place,
        Err(GeocodeError::NotFound(_)) => {
            info!(
                "GET /get_sunrise_sunset country={} -> no geocoder match ({:.1}ms)",
                country,
                start.elapsed().as_secs_f64() * 1000.0,
            );
            return Err((
                StatusCode::OK,
                Json(ErrorBody {
                    error: GEOCODE_FAILED.to_string(),
                }),
            )
                .into_response());
        }
        Err(e) => {
            return Err(
                api_error(StatusCode::BAD_GATEWAY, format!("Geocoding failed: {}", e))
                    .into_response(),
            );
        }
    };

    let sun = state.sun.fetch(place.coords, date).map_err(|e| {
        api_error(
            StatusCode::BAD_GATEWAY,
            format!("Sunrise/sunset lookup failed: {}", e),
        )
        .into_response()
    })?;

    // Best effort: a failed reverse lookup only costs the city/state keys.
    let name = state.reverse.describe(place.coords).unwrap_or_else(|e| {
        warn!("reverse geocoding {} failed: {}", place.coords, e);
        PlaceName::default()
    });

    let sunrise = localtime::to_local_clock(&sun.sunrise, date, &place.timezone)
        .map_err(conversion_failed)?;
    let sunset = localtime::to_local_clock(&sun.sunset, date, &place.timezone)
        .map_err(conversion_failed)?;

    info!(
        "GET /get_sunrise_sunset country={} date={} -> {} ({:.1}ms)",
        country,
        date,
        place.timezone,
        start.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(Json(SunriseSunsetResponse {
        sunrise,
        sunset,
        city: non_empty(name.city),
        state: non_empty(name.state),
    }))
}

fn conversion_failed(e: ConvertError) -> Response {
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Time conversion failed: {}", e),
    )
    .into_response()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
