use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use pricelens_core::{display_name, unify, UnifiedProduct};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{
    build_aggregator, map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta,
};

#[derive(Debug, Serialize)]
pub(super) struct PricePointItem {
    platform: String,
    price: Decimal,
    currency_code: String,
    captured_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryQuery {
    pub limit: Option<i64>,
}

/// `GET /api/v1/product/{sku}` — the unified cross-platform view of one SKU.
///
/// Aggregates all active gateways concurrently, unifies the results, and
/// records the observed quotes as history. Partial source failure degrades
/// the platform list; total failure returns an empty-platforms product, not
/// an error.
pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(sku): Path<String>,
) -> Result<Json<ApiResponse<UnifiedProduct>>, ApiError> {
    let aggregator = build_aggregator(&state, &req_id.0).await?;
    let raw = aggregator.aggregate_product(&sku).await;

    let product_name = display_name(&raw).unwrap_or_else(|| sku.clone());
    let unified = unify(&sku, &product_name, &raw, &state.config.display_currency);

    // History recording is best-effort; a write failure must not cost the
    // caller the aggregation result it already has.
    let points: Vec<_> = unified
        .platforms
        .iter()
        .map(|quote| pricelens_db::NewPricePoint {
            platform: quote.platform.clone(),
            price: quote.price,
            currency_code: quote.currency.clone(),
        })
        .collect();
    if let Err(e) = pricelens_db::insert_price_points(&state.pool, &sku, &points).await {
        tracing::warn!(error = %e, sku, "failed to record price history");
    }

    Ok(Json(ApiResponse {
        data: unified,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// `GET /api/v1/product/{sku}/history` — recorded price points, newest first.
pub(super) async fn list_product_history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(sku): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<PricePointItem>>>, ApiError> {
    let rows = pricelens_db::list_price_history(&state.pool, &sku, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| PricePointItem {
            platform: row.platform,
            price: row.price,
            currency_code: row.currency_code,
            captured_at: row.captured_at,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_point_item_is_serializable() {
        let item = PricePointItem {
            platform: "Shopify".to_string(),
            price: "12999.00".parse().expect("decimal"),
            currency_code: "INR".to_string(),
            captured_at: Utc::now(),
        };
        let json = serde_json::to_string(&item).expect("serialize");
        assert!(json.contains("\"platform\":\"Shopify\""));
        assert!(json.contains("12999.00"));
    }
}
