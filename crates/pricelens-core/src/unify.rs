//! Reduction of raw per-platform payloads into one [`UnifiedProduct`].

use rust_decimal::Decimal;
use serde_json::Value;

use crate::model::{Platform, RawPayload, UnifiedProduct};
use crate::normalize::normalize;

/// Unifies a bag of raw payloads into a single comparable product record.
///
/// Payloads with an unrecognized source tag are skipped silently; a payload
/// with missing fields contributes zeroed values (see [`normalize`]). The
/// `platforms` list preserves the input order, so callers that fetch in
/// adapter registration order get deterministic output. With no usable
/// payloads, `lowest_price` and `price_gap` are both zero and `platforms`
/// is empty.
#[must_use]
pub fn unify(
    sku: &str,
    product_name: &str,
    raw_payloads: &[RawPayload],
    currency: &str,
) -> UnifiedProduct {
    let platforms: Vec<_> = raw_payloads
        .iter()
        .filter_map(|payload| {
            Platform::from_tag(&payload.source)
                .map(|platform| normalize(platform, &payload.data, currency))
        })
        .collect();

    let min_price = platforms.iter().map(|q| q.price).min();
    let max_price = platforms.iter().map(|q| q.price).max();

    UnifiedProduct {
        product_name: product_name.to_owned(),
        sku: sku.to_owned(),
        platforms,
        lowest_price: min_price.unwrap_or(Decimal::ZERO),
        price_gap: match (min_price, max_price) {
            (Some(min), Some(max)) => max - min,
            _ => Decimal::ZERO,
        },
        currency: currency.to_owned(),
    }
}

/// Best product title found in the raw payloads: the Shopify `title` field
/// when present. Callers fall back to the SKU when no payload carries one.
#[must_use]
pub fn display_name(raw_payloads: &[RawPayload]) -> Option<String> {
    raw_payloads
        .iter()
        .filter(|p| Platform::from_tag(&p.source) == Some(Platform::Shopify))
        .find_map(|p| p.data.get("title").and_then(Value::as_str))
        .map(str::to_owned)
}
