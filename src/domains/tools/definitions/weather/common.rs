//! Common utilities shared across weather tools.
//!
//! Provider constants, coordinate validation and request URL construction.

use std::time::Duration;

use serde::Serialize;

use crate::domains::tools::ToolError;

/// Default base URL of the Open-Meteo API.
pub const DEFAULT_API_BASE: &str = "https://api.open-meteo.com/v1";

/// User-Agent sent with every upstream request.
pub const USER_AGENT: &str = "weather-app/1.0";

/// Upper bound on a single upstream request, connection to last body byte.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Current-condition fields requested from the provider.
pub const CURRENT_FIELDS: &str = "temperature_2m,is_day,showers,cloud_cover,wind_speed_10m,\
wind_direction_10m,pressure_msl,snowfall,precipitation,relative_humidity_2m,\
apparent_temperature,rain,weather_code,surface_pressure,wind_gusts_10m";

/// Message returned when the provider yields no data.
pub const UNAVAILABLE_MESSAGE: &str = "Unable to fetch current weather data for this location.";

/// A validated coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpstreamQuery {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize)]
struct ForecastParams<'a> {
    latitude: f64,
    longitude: f64,
    current: &'a str,
}

impl UpstreamQuery {
    /// Validate a coordinate pair.
    ///
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180]; NaN and
    /// infinities are rejected.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ToolError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ToolError::invalid_arguments(format!(
                "Invalid latitude: {}. Must be between -90 and 90.",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ToolError::invalid_arguments(format!(
                "Invalid longitude: {}. Must be between -180 and 180.",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build the forecast URL for this query under `api_base`.
    pub fn forecast_url(&self, api_base: &str) -> String {
        let params = ForecastParams {
            latitude: self.latitude,
            longitude: self.longitude,
            current: CURRENT_FIELDS,
        };
        // Serializing three scalar fields cannot fail
        let query = serde_urlencoded::to_string(&params).unwrap_or_default();
        format!("{}/forecast?{}", api_base.trim_end_matches('/'), query)
    }
}
