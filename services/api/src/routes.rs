//! API routes and handlers
//!
//! Success responses wrap the operation's result in a
//! `{success: true, data: ...}` envelope; failures are mapped to status
//! codes by `ApiError`.

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::{AuthUser, auth_middleware},
    models::{
        AuthResponse, FavoriteRequest, LoginRequest, RegisterRequest, UserResponse,
        weather::{CheckFavoriteQuery, CoordinatesQuery, SearchQuery, WeatherQuery},
    },
    state::AppState,
    validation,
    weather::WeatherError,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/auth/me", get(me))
        .route("/favorites", post(add_favorite).get(get_favorites))
        .route("/favorites/check", get(check_favorite))
        .route("/favorites/:favorite_id", delete(remove_favorite))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/weather", get(get_weather))
        .route("/weather/coordinates", get(get_weather_by_coordinates))
        .route("/weather/search", get(search_cities))
        .merge(protected_routes);

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }
    }))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_email(&payload.email).map_err(ApiError::Validation)?;
    validation::validate_password(&payload.password).map_err(ApiError::Validation)?;
    validation::validate_name(&payload.name).map_err(ApiError::Validation)?;

    let user = state
        .user_repository
        .create(&payload.email, &payload.password, &payload.name)
        .await?;

    let token = state.jwt_service.issue_token(user.id).map_err(|e| {
        error!("Failed to issue token: {}", e);
        ApiError::InternalServerError
    })?;

    info!("Registered user {}", user.id);

    let response = AuthResponse {
        user: UserResponse::from(user),
        token,
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({"success": true, "data": response})),
    ))
}

/// Log a user in
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_email(&payload.email).map_err(ApiError::Validation)?;

    // Unknown email and wrong password take the same exit
    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !state.user_repository.verify_password(&user, &payload.password)? {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.jwt_service.issue_token(user.id).map_err(|e| {
        error!("Failed to issue token: {}", e);
        ApiError::InternalServerError
    })?;

    info!("User {} logged in", user.id);

    let response = AuthResponse {
        user: UserResponse::from(user),
        token,
    };

    Ok(Json(json!({"success": true, "data": response})))
}

/// Get the authenticated user's public profile
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .find_by_id(auth.id)
        .await?
        .ok_or(ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "data": { "user": UserResponse::from(user) }
    })))
}

/// Get current weather by city name
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_city_name(&query.city).map_err(ApiError::Validation)?;

    let weather = state
        .weather
        .current_by_city(&query.city)
        .await
        .map_err(map_weather_error)?;

    Ok(Json(json!({"success": true, "data": weather})))
}

/// Get current weather by coordinates
pub async fn get_weather_by_coordinates(
    State(state): State<AppState>,
    Query(query): Query<CoordinatesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_coordinates(query.lat, query.lon).map_err(ApiError::Validation)?;

    let weather = state
        .weather
        .current_by_coordinates(query.lat, query.lon)
        .await
        .map_err(map_weather_error)?;

    Ok(Json(json!({"success": true, "data": weather})))
}

/// Search cities via the geocoding API
pub async fn search_cities(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_search_query(&query.query).map_err(ApiError::Validation)?;

    let limit = query.limit.unwrap_or(5).clamp(1, 10);

    let cities = state
        .weather
        .search_cities(&query.query, limit)
        .await
        .map_err(map_weather_error)?;

    Ok(Json(json!({"success": true, "data": cities})))
}

/// Add a favorite for the authenticated user
pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<FavoriteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_city_name(&payload.city_name).map_err(ApiError::Validation)?;
    if payload.country.trim().is_empty() {
        return Err(ApiError::Validation("Country is required".to_string()));
    }
    validation::validate_coordinates(payload.latitude, payload.longitude)
        .map_err(ApiError::Validation)?;

    let favorite = state.favorites.add_favorite(auth.id, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"success": true, "data": favorite})),
    ))
}

/// List the authenticated user's favorites with weather snapshots
pub async fn get_favorites(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let favorites = state.favorites.list_with_weather(auth.id).await?;

    Ok(Json(json!({"success": true, "data": favorites})))
}

/// Check whether exact coordinates are already a favorite
pub async fn check_favorite(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<CheckFavoriteQuery>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_coordinates(query.lat, query.lon).map_err(ApiError::Validation)?;

    let is_favorite = state
        .favorites
        .is_favorite(auth.id, query.lat, query.lon)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": { "isFavorite": is_favorite }
    })))
}

/// Remove one of the authenticated user's favorites
pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(favorite_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.favorites.remove_favorite(auth.id, favorite_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": { "message": "Favorite removed successfully" }
    })))
}

/// Map weather gateway failures for the public weather endpoints
fn map_weather_error(error: WeatherError) -> ApiError {
    match error {
        WeatherError::CityNotFound => ApiError::NotFound("City not found".to_string()),
        other => {
            error!("Weather provider request failed: {}", other);
            ApiError::InternalServerError
        }
    }
}
