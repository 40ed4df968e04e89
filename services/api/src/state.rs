//! Application state shared across handlers

use sqlx::PgPool;

use crate::{
    favorites::FavoritesService, jwt::JwtService, repositories::UserRepository,
    weather::WeatherService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub favorites: FavoritesService,
    pub weather: WeatherService,
}
