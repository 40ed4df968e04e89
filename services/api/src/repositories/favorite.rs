//! Favorite repository for database operations
//!
//! The `(user_id, latitude, longitude)` unique constraint is the only
//! concurrency control: two concurrent adds for the same coordinate race at
//! the insert and the loser gets the violation.

use common::error::DatabaseError;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{Favorite, FavoriteRequest},
};

/// Favorite repository
#[derive(Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    /// Create a new favorite repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a favorite for a user
    ///
    /// Fails with `Conflict` when the user already has a favorite at exactly
    /// these coordinates.
    pub async fn insert(
        &self,
        user_id: Uuid,
        request: &FavoriteRequest,
    ) -> ApiResult<Favorite> {
        info!("Adding favorite {} for user {}", request.city_name, user_id);

        let result = sqlx::query(
            r#"
            INSERT INTO favorites (user_id, city_name, country, state, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, city_name, country, state, latitude, longitude, created_at
            "#,
        )
        .bind(user_id)
        .bind(&request.city_name)
        .bind(&request.country)
        .bind(&request.state)
        .bind(request.latitude)
        .bind(request.longitude)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(Self::row_to_favorite(&row)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(ApiError::Conflict("City is already in favorites".to_string()))
            }
            Err(e) => Err(DatabaseError::Query(e).into()),
        }
    }

    /// Delete a favorite owned by the given user
    ///
    /// Returns `NotFound` when no row matched, which covers both "doesn't
    /// exist" and "belongs to someone else" without leaking which.
    pub async fn delete(&self, user_id: Uuid, favorite_id: Uuid) -> ApiResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM favorites
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(favorite_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Favorite not found".to_string()));
        }

        info!("Removed favorite {} for user {}", favorite_id, user_id);
        Ok(())
    }

    /// List a user's favorites, newest first
    pub async fn list_by_user(&self, user_id: Uuid) -> ApiResult<Vec<Favorite>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, city_name, country, state, latitude, longitude, created_at
            FROM favorites
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(Self::row_to_favorite).collect())
    }

    /// Exact-match existence check on the uniqueness key
    pub async fn exists(
        &self,
        user_id: Uuid,
        latitude: f64,
        longitude: f64,
    ) -> ApiResult<bool> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) as count
            FROM favorites
            WHERE user_id = $1 AND latitude = $2 AND longitude = $3
            "#,
        )
        .bind(user_id)
        .bind(latitude)
        .bind(longitude)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        let count: i64 = row.get("count");
        Ok(count > 0)
    }

    fn row_to_favorite(row: &sqlx::postgres::PgRow) -> Favorite {
        Favorite {
            id: row.get("id"),
            user_id: row.get("user_id"),
            city_name: row.get("city_name"),
            country: row.get("country"),
            state: row.get("state"),
            latitude: row.get("latitude"),
            longitude: row.get("longitude"),
            created_at: row.get("created_at"),
        }
    }
}
