//! Database operations for the `users` table.
//!
//! The API layer never sees raw credentials; lookups are by the salted
//! SHA-256 hash of the presented bearer token.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub api_key_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Resolves the user owning the given API key hash, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn find_user_by_api_key_hash(
    pool: &PgPool,
    api_key_hash: &str,
) -> Result<Option<UserRow>, DbError> {
    let user = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, api_key_hash, created_at FROM users WHERE api_key_hash = $1",
    )
    .bind(api_key_hash)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Inserts a user record and returns its id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure (including unique violations
/// on `email` or `api_key_hash`).
pub async fn insert_user(pool: &PgPool, email: &str, api_key_hash: &str) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (email, api_key_hash) VALUES ($1, $2) RETURNING id",
    )
    .bind(email)
    .bind(api_key_hash)
    .fetch_one(pool)
    .await?;
    Ok(id)
}
