use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod error;
mod favorites;
mod jwt;
mod middleware;
mod models;
mod repositories;
mod routes;
mod state;
mod validation;
mod weather;

use common::database::{self, DatabaseConfig};
use common::error::DatabaseError;

use crate::{
    favorites::FavoritesService,
    jwt::{JwtConfig, JwtService},
    repositories::{FavoriteRepository, UserRepository},
    state::AppState,
    weather::{WeatherConfig, WeatherService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting weather API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Apply pending migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    info!("Database migrations applied");

    // Initialize the token service and weather gateway
    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(&jwt_config);

    let weather_config = WeatherConfig::from_env()?;
    let weather = WeatherService::new(&weather_config);

    // Initialize repositories and the favorites workflow
    let user_repository = UserRepository::new(pool.clone());
    let favorite_repository = FavoriteRepository::new(pool.clone());
    let favorites = FavoritesService::new(favorite_repository, weather.clone());

    let app_state = AppState {
        db_pool: pool,
        jwt_service,
        user_repository,
        favorites,
        weather,
    };

    info!("Weather API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse()
        .unwrap_or(3001);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Weather API service listening on 0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
