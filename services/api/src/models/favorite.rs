//! Favorite model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Favorite entity: a user-saved city/coordinate pair
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub city_name: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

/// Request for adding a favorite
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub city_name: String,
    pub country: String,
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Live weather snapshot attached to a favorite at read time
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub description: String,
    pub humidity: u32,
    pub pressure: u32,
    pub wind_speed: f64,
}

/// A favorite joined with an optional weather snapshot. Never persisted;
/// `weather` is `None` when enrichment was unavailable and the key is then
/// omitted from the JSON entirely.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteWithWeather {
    #[serde(flatten)]
    pub favorite: Favorite,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_favorite() -> Favorite {
        Favorite {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            city_name: "Paris".to_string(),
            country: "FR".to_string(),
            state: None,
            latitude: 48.8566,
            longitude: 2.3522,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_unenriched_favorite_omits_weather_key() {
        let enriched = FavoriteWithWeather {
            favorite: sample_favorite(),
            weather: None,
        };

        let value = serde_json::to_value(&enriched).unwrap();
        assert!(value.get("weather").is_none());
        assert!(value.get("state").is_none());
        assert_eq!(value["cityName"], "Paris");
        assert_eq!(value["latitude"], 48.8566);
    }

    #[test]
    fn test_enriched_favorite_flattens_fields() {
        let enriched = FavoriteWithWeather {
            favorite: sample_favorite(),
            weather: Some(WeatherSnapshot {
                temperature: 72.0,
                description: "clear sky".to_string(),
                humidity: 40,
                pressure: 1013,
                wind_speed: 5.3,
            }),
        };

        let value = serde_json::to_value(&enriched).unwrap();
        assert_eq!(value["cityName"], "Paris");
        assert_eq!(value["weather"]["windSpeed"], 5.3);
        assert_eq!(value["weather"]["description"], "clear sky");
    }
}
