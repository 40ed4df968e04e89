//! Favorites workflow
//!
//! Orchestrates the favorite repository and the weather gateway. Enrichment
//! is best-effort everywhere: a gateway failure substitutes `None` for the
//! snapshot and never fails the surrounding add or list operation.

use tracing::warn;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{Favorite, FavoriteRequest, FavoriteWithWeather, WeatherSnapshot},
    repositories::FavoriteRepository,
    weather::WeatherService,
};

/// Favorites workflow service
#[derive(Clone)]
pub struct FavoritesService {
    repository: FavoriteRepository,
    weather: WeatherService,
}

impl FavoritesService {
    /// Create a new favorites service
    pub fn new(repository: FavoriteRepository, weather: WeatherService) -> Self {
        Self {
            repository,
            weather,
        }
    }

    /// Add a favorite and attempt to enrich it with a live weather snapshot
    pub async fn add_favorite(
        &self,
        user_id: Uuid,
        request: &FavoriteRequest,
    ) -> ApiResult<FavoriteWithWeather> {
        let favorite = self.repository.insert(user_id, request).await?;
        Ok(self.enrich(favorite).await)
    }

    /// Remove a favorite owned by the given user
    pub async fn remove_favorite(&self, user_id: Uuid, favorite_id: Uuid) -> ApiResult<()> {
        self.repository.delete(user_id, favorite_id).await
    }

    /// List a user's favorites, newest first, each enriched independently
    ///
    /// Enrichment calls run concurrently; results are collected in query
    /// order, not completion order. A favorite whose call fails is included
    /// unenriched rather than dropped.
    pub async fn list_with_weather(
        &self,
        user_id: Uuid,
    ) -> ApiResult<Vec<FavoriteWithWeather>> {
        let favorites = self.repository.list_by_user(user_id).await?;

        let mut handles = Vec::with_capacity(favorites.len());
        for favorite in favorites {
            let service = self.clone();
            handles.push(tokio::spawn(async move { service.enrich(favorite).await }));
        }

        let mut enriched = Vec::with_capacity(handles.len());
        for handle in handles {
            enriched.push(handle.await.map_err(|_| ApiError::InternalServerError)?);
        }

        Ok(enriched)
    }

    /// Exact-equality check of the `(user, latitude, longitude)` key
    pub async fn is_favorite(
        &self,
        user_id: Uuid,
        latitude: f64,
        longitude: f64,
    ) -> ApiResult<bool> {
        self.repository.exists(user_id, latitude, longitude).await
    }

    /// Attempt enrichment; on any gateway failure substitute `None`
    async fn enrich(&self, favorite: Favorite) -> FavoriteWithWeather {
        let weather = match self
            .weather
            .current_by_coordinates(favorite.latitude, favorite.longitude)
            .await
        {
            Ok(current) => Some(WeatherSnapshot {
                temperature: current.temperature,
                description: current.description,
                humidity: current.humidity,
                pressure: current.pressure,
                wind_speed: current.wind_speed,
            }),
            Err(e) => {
                warn!(
                    "Weather enrichment failed for favorite {}: {}",
                    favorite.id, e
                );
                None
            }
        };

        FavoriteWithWeather { favorite, weather }
    }
}
