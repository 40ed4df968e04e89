//! Weather lookup payloads

use serde::{Deserialize, Serialize};

/// Current weather conditions for a location
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub temperature: f64,
    pub description: String,
    pub humidity: u32,
    pub pressure: u32,
    pub wind_speed: f64,
    pub city: String,
    pub country: String,
}

/// A geocoding match for a city search
#[derive(Debug, Clone, Serialize)]
pub struct CitySearchResult {
    pub name: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Query parameters for weather by city name
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherQuery {
    pub city: String,
}

/// Query parameters for weather by coordinates
#[derive(Debug, Clone, Deserialize)]
pub struct CoordinatesQuery {
    pub lat: f64,
    pub lon: f64,
}

/// Query parameters for city search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub limit: Option<u32>,
}

/// Query parameters for the is-favorite check
#[derive(Debug, Clone, Deserialize)]
pub struct CheckFavoriteQuery {
    pub lat: f64,
    pub lon: f64,
}
