//! Weather gateway for the OpenWeatherMap API
//!
//! Side-effect-only client: looks up current conditions and geocoding
//! matches, persists nothing. Failures are typed so callers can distinguish
//! a bad API key from a missing city from a transport problem; the favorites
//! workflow treats all of them as "enrichment unavailable".

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{CitySearchResult, CurrentWeather};

const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";

/// Weather gateway configuration
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: String,
}

impl WeatherConfig {
    /// Create a new WeatherConfig from environment variables
    ///
    /// # Environment Variables
    /// - `OPENWEATHER_API_KEY`: OpenWeatherMap API key
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENWEATHER_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENWEATHER_API_KEY environment variable not set"))?;

        Ok(WeatherConfig { api_key })
    }
}

/// Errors from the weather provider
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Provider rejected the API key
    #[error("Invalid API key")]
    Unauthorized,

    /// Provider has no data for the requested city
    #[error("City not found")]
    CityNotFound,

    /// Provider returned an unexpected status
    #[error("Weather API error: {0}")]
    Api(u16),

    /// Transport or decoding failure
    #[error("Failed to fetch weather data: {0}")]
    Request(#[from] reqwest::Error),
}

/// Weather gateway client
#[derive(Clone)]
pub struct WeatherService {
    client: reqwest::Client,
    api_key: String,
}

impl WeatherService {
    /// Create a new weather service
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
        }
    }

    /// Fetch current weather by city name
    pub async fn current_by_city(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let response = self
            .client
            .get(WEATHER_URL)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "imperial"),
            ])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let data: OwmCurrent = response.json().await?;
                Ok(data.into())
            }
            StatusCode::UNAUTHORIZED => Err(WeatherError::Unauthorized),
            StatusCode::NOT_FOUND => Err(WeatherError::CityNotFound),
            status => Err(WeatherError::Api(status.as_u16())),
        }
    }

    /// Fetch current weather by coordinates
    pub async fn current_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, WeatherError> {
        let response = self
            .client
            .get(WEATHER_URL)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "imperial".to_string()),
            ])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let data: OwmCurrent = response.json().await?;
                Ok(data.into())
            }
            StatusCode::UNAUTHORIZED => Err(WeatherError::Unauthorized),
            status => Err(WeatherError::Api(status.as_u16())),
        }
    }

    /// Search cities by name via the geocoding API
    pub async fn search_cities(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CitySearchResult>, WeatherError> {
        let response = self
            .client
            .get(GEOCODING_URL)
            .query(&[
                ("q", query.trim().to_string()),
                ("limit", limit.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let data: Vec<OwmGeoMatch> = response.json().await?;
                Ok(data.into_iter().map(Into::into).collect())
            }
            StatusCode::UNAUTHORIZED => Err(WeatherError::Unauthorized),
            status => Err(WeatherError::Api(status.as_u16())),
        }
    }
}

/// Current-weather response shape from the provider
#[derive(Debug, Deserialize)]
struct OwmCurrent {
    main: OwmMain,
    weather: Vec<OwmCondition>,
    wind: Option<OwmWind>,
    name: String,
    sys: OwmSys,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: u32,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    #[serde(default)]
    country: String,
}

impl From<OwmCurrent> for CurrentWeather {
    fn from(data: OwmCurrent) -> Self {
        CurrentWeather {
            temperature: data.main.temp.round(),
            description: data
                .weather
                .first()
                .map(|c| c.description.clone())
                .unwrap_or_default(),
            humidity: data.main.humidity,
            pressure: data.main.pressure,
            wind_speed: data.wind.and_then(|w| w.speed).unwrap_or(0.0),
            city: data.name,
            country: data.sys.country,
        }
    }
}

/// Geocoding match shape from the provider
#[derive(Debug, Deserialize)]
struct OwmGeoMatch {
    name: String,
    country: String,
    state: Option<String>,
    lat: f64,
    lon: f64,
}

impl From<OwmGeoMatch> for CitySearchResult {
    fn from(data: OwmGeoMatch) -> Self {
        CitySearchResult {
            name: data.name,
            country: data.country,
            state: data.state,
            lat: data.lat,
            lon: data.lon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_weather_decoding() {
        let body = r#"{
            "main": {"temp": 71.6, "humidity": 40, "pressure": 1013},
            "weather": [{"description": "clear sky"}],
            "wind": {"speed": 5.3},
            "name": "Paris",
            "sys": {"country": "FR"}
        }"#;

        let data: OwmCurrent = serde_json::from_str(body).unwrap();
        let weather = CurrentWeather::from(data);
        assert_eq!(weather.temperature, 72.0);
        assert_eq!(weather.description, "clear sky");
        assert_eq!(weather.humidity, 40);
        assert_eq!(weather.pressure, 1013);
        assert_eq!(weather.wind_speed, 5.3);
        assert_eq!(weather.city, "Paris");
        assert_eq!(weather.country, "FR");
    }

    #[test]
    fn test_current_weather_defaults_missing_wind() {
        let body = r#"{
            "main": {"temp": 60.2, "humidity": 80, "pressure": 1002},
            "weather": [{"description": "mist"}],
            "name": "London",
            "sys": {"country": "GB"}
        }"#;

        let data: OwmCurrent = serde_json::from_str(body).unwrap();
        let weather = CurrentWeather::from(data);
        assert_eq!(weather.temperature, 60.0);
        assert_eq!(weather.wind_speed, 0.0);
    }

    #[test]
    fn test_geocoding_decoding() {
        let body = r#"[
            {"name": "Springfield", "country": "US", "state": "Illinois", "lat": 39.8, "lon": -89.6},
            {"name": "Springfield", "country": "US", "lat": 42.1, "lon": -72.5}
        ]"#;

        let data: Vec<OwmGeoMatch> = serde_json::from_str(body).unwrap();
        let results: Vec<CitySearchResult> = data.into_iter().map(Into::into).collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].state.as_deref(), Some("Illinois"));
        assert!(results[1].state.is_none());
    }
}
