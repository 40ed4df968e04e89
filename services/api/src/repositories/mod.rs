//! Repositories for database operations

pub mod favorite;
pub mod user;

pub use favorite::FavoriteRepository;
pub use user::UserRepository;
