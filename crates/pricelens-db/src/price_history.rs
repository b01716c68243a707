//! Database operations for the `price_history` table: one row per platform
//! quote observed during unification.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `price_history` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PricePointRow {
    pub id: i64,
    pub sku: String,
    pub platform: String,
    pub price: Decimal,
    pub currency_code: String,
    pub captured_at: DateTime<Utc>,
}

/// One observed quote, ready for insertion.
#[derive(Debug, Clone)]
pub struct NewPricePoint {
    pub platform: String,
    pub price: Decimal,
    pub currency_code: String,
}

/// Records the quotes observed for a SKU in one aggregation pass. A no-op
/// for an empty slice.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn insert_price_points(
    pool: &PgPool,
    sku: &str,
    points: &[NewPricePoint],
) -> Result<(), DbError> {
    for point in points {
        sqlx::query(
            "INSERT INTO price_history (sku, platform, price, currency_code) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(sku)
        .bind(&point.platform)
        .bind(point.price)
        .bind(&point.currency_code)
        .execute(pool)
        .await?;
    }
    Ok(())
}

/// Recorded price points for a SKU, newest first, bounded by `limit`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_price_history(
    pool: &PgPool,
    sku: &str,
    limit: i64,
) -> Result<Vec<PricePointRow>, DbError> {
    let rows = sqlx::query_as::<_, PricePointRow>(
        "SELECT id, sku, platform, price, currency_code, captured_at \
         FROM price_history WHERE sku = $1 \
         ORDER BY captured_at DESC, id DESC LIMIT $2",
    )
    .bind(sku)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
