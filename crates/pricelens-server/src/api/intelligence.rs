//! Intelligence endpoints: cross-platform metric summaries and per-SKU
//! price benchmarking. Both are thin call sites over the same
//! aggregate → normalize → unify core, run across the configured watchlist.

use std::time::Instant;

use axum::{extract::State, Extension, Json};
use futures::future::join_all;
use pricelens_core::{display_name, unify, PlatformQuote, UnifiedProduct};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{build_aggregator, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct UnifiedMetric {
    label: String,
    value: String,
    trend: String,
    sources: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProductComparison {
    name: String,
    sku: String,
    platforms: Vec<PlatformQuote>,
    lowest_price: Decimal,
    price_gap: Decimal,
}

/// Unifies every watchlist SKU; the SKUs themselves are fetched
/// concurrently, each one fanning out across the platforms in turn.
async fn unify_watchlist(state: &AppState, request_id: &str) -> Result<Vec<UnifiedProduct>, ApiError> {
    let aggregator = build_aggregator(state, request_id).await?;
    let currency = state.config.display_currency.as_str();

    let fetches = state.config.watchlist_skus.iter().map(|sku| {
        let aggregator = &aggregator;
        async move {
            let raw = aggregator.aggregate_product(sku).await;
            let product_name = display_name(&raw).unwrap_or_else(|| sku.clone());
            unify(sku, &product_name, &raw, currency)
        }
    });

    Ok(join_all(fetches).await)
}

/// `GET /api/v1/intelligence/hub` — unified metric summaries for the
/// dashboard.
pub(super) async fn get_unified_metrics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<UnifiedMetric>>>, ApiError> {
    let started = Instant::now();
    let products = unify_watchlist(&state, &req_id.0).await?;
    let latency_ms = started.elapsed().as_millis();

    let sources: Vec<String> = products
        .first()
        .map(|p| p.platforms.iter().map(|q| q.platform.to_lowercase()).collect())
        .unwrap_or_default();

    let currency = &state.config.display_currency;
    let data = vec![
        UnifiedMetric {
            label: "Tracked SKUs".to_owned(),
            value: products.len().to_string(),
            trend: "Stable".to_owned(),
            sources: sources.clone(),
        },
        UnifiedMetric {
            label: "Average Price Gap".to_owned(),
            value: format!("{currency} {:.2}", average_price_gap(&products)),
            trend: "Stable".to_owned(),
            sources: sources.clone(),
        },
        UnifiedMetric {
            label: "Lowest Price Leader".to_owned(),
            value: lowest_price_leader(&products).unwrap_or_else(|| "n/a".to_owned()),
            trend: "Stable".to_owned(),
            sources,
        },
        UnifiedMetric {
            label: "Aggregation Latency".to_owned(),
            value: format!("{latency_ms}ms"),
            trend: "Stable".to_owned(),
            sources: vec!["internal".to_owned()],
        },
    ];

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// `GET /api/v1/intelligence/benchmarking` — per-SKU platform price
/// comparison rows over the watchlist.
pub(super) async fn get_price_benchmarking(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<ProductComparison>>>, ApiError> {
    let products = unify_watchlist(&state, &req_id.0).await?;

    let data = products
        .into_iter()
        .map(|product| ProductComparison {
            name: product.product_name,
            sku: product.sku,
            platforms: product.platforms,
            lowest_price: product.lowest_price,
            price_gap: product.price_gap,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Mean price gap across products that produced at least one quote.
fn average_price_gap(products: &[UnifiedProduct]) -> Decimal {
    let gaps: Vec<Decimal> = products
        .iter()
        .filter(|p| !p.platforms.is_empty())
        .map(|p| p.price_gap)
        .collect();
    if gaps.is_empty() {
        return Decimal::ZERO;
    }
    gaps.iter().sum::<Decimal>() / Decimal::from(gaps.len())
}

/// The platform winning the most lowest-price comparisons across the
/// watchlist. Ties resolve to the platform seen first.
fn lowest_price_leader(products: &[UnifiedProduct]) -> Option<String> {
    let mut wins: Vec<(String, usize)> = Vec::new();
    for product in products {
        let Some(winner) = product.platforms.iter().min_by_key(|q| q.price) else {
            continue;
        };
        match wins.iter_mut().find(|(name, _)| *name == winner.platform) {
            Some((_, count)) => *count += 1,
            None => wins.push((winner.platform.clone(), 1)),
        }
    }
    wins.into_iter()
        .max_by_key(|&(_, count)| count)
        .map(|(name, _)| name)
}
