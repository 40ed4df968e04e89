//! API models for entities, request payloads, and response projections

pub mod favorite;
pub mod user;
pub mod weather;

// Re-export for convenience
pub use favorite::{Favorite, FavoriteRequest, FavoriteWithWeather, WeatherSnapshot};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User, UserResponse};
pub use weather::{CitySearchResult, CurrentWeather};
