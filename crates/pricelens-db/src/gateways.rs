//! Database operations for the `gateways` table: persisted platform
//! credentials injected into the aggregator per request.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `gateways` table. `platform` is the lowercase wire tag;
/// the caller decides what to do with tags it does not recognize.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GatewayRow {
    pub id: i64,
    pub platform: String,
    pub api_key: String,
    pub api_secret: Option<String>,
    pub endpoint_url: String,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

/// Input for [`upsert_gateway`].
#[derive(Debug, Clone)]
pub struct NewGateway {
    pub platform: String,
    pub api_key: String,
    pub api_secret: Option<String>,
    pub endpoint_url: String,
}

/// Upserts a gateway record, keyed by platform tag. Re-deploying a platform
/// replaces its credentials and reactivates it.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn upsert_gateway(pool: &PgPool, gateway: &NewGateway) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO gateways (platform, api_key, api_secret, endpoint_url, active, updated_at) \
         VALUES ($1, $2, $3, $4, TRUE, NOW()) \
         ON CONFLICT (platform) DO UPDATE SET \
           api_key = EXCLUDED.api_key, \
           api_secret = EXCLUDED.api_secret, \
           endpoint_url = EXCLUDED.endpoint_url, \
           active = TRUE, \
           updated_at = NOW() \
         RETURNING id",
    )
    .bind(&gateway.platform)
    .bind(&gateway.api_key)
    .bind(&gateway.api_secret)
    .bind(&gateway.endpoint_url)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Active gateways in insertion order. This order is also the adapter
/// registration order used by the aggregator.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_active_gateways(pool: &PgPool) -> Result<Vec<GatewayRow>, DbError> {
    let rows = sqlx::query_as::<_, GatewayRow>(
        "SELECT id, platform, api_key, api_secret, endpoint_url, active, updated_at \
         FROM gateways WHERE active ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
