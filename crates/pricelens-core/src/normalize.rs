//! Per-platform normalization from raw API payloads to [`PlatformQuote`].
//!
//! Each platform has a fixed extraction rule for its known response shape.
//! Normalization is best-effort: missing or malformed fields degrade to zero
//! rather than failing, so one bad payload never aborts an aggregation.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::model::{Platform, PlatformQuote};

/// Amazon's catalog payload carries no inventory; a true stock figure needs a
/// separate SP-API inventory call. Until that integration exists we report a
/// fixed placeholder. Documented limitation, not a bug.
pub const AMAZON_STOCK_PLACEHOLDER: u32 = 10;

/// Normalizes one platform's raw payload into a quote in the given display
/// currency. Inputs are treated as already same-currency; no FX conversion
/// happens here.
#[must_use]
pub fn normalize(platform: Platform, data: &Value, currency: &str) -> PlatformQuote {
    match platform {
        Platform::Shopify => normalize_shopify(data, currency),
        Platform::Amazon => normalize_amazon(data, currency),
        Platform::Flipkart => normalize_flipkart(data, currency),
    }
}

/// Shopify Admin API shape: price and inventory live on the first variant,
/// with the price encoded as a string.
///
/// `{"title": "...", "variants": [{"price": "12999.00", "inventory_quantity": 45}]}`
fn normalize_shopify(data: &Value, currency: &str) -> PlatformQuote {
    let variant = data
        .get("variants")
        .and_then(Value::as_array)
        .and_then(|variants| variants.first());

    PlatformQuote {
        platform: Platform::Shopify.display_name().to_owned(),
        price: price_field(variant.and_then(|v| v.get("price"))),
        stock: stock_field(variant.and_then(|v| v.get("inventory_quantity"))),
        currency: currency.to_owned(),
    }
}

/// Amazon SP-API catalog shape: list price on the first attribute set.
///
/// `{"AttributeSets": [{"ListPrice": {"Amount": 11499.00}}], "FulfillmentChannel": "AMAZON"}`
fn normalize_amazon(data: &Value, currency: &str) -> PlatformQuote {
    let amount = data
        .get("AttributeSets")
        .and_then(Value::as_array)
        .and_then(|sets| sets.first())
        .and_then(|set| set.get("ListPrice"))
        .and_then(|list_price| list_price.get("Amount"));

    PlatformQuote {
        platform: Platform::Amazon.display_name().to_owned(),
        price: price_field(amount),
        stock: AMAZON_STOCK_PLACEHOLDER,
        currency: currency.to_owned(),
    }
}

/// Flipkart Seller API shape: flat top-level fields.
///
/// `{"flipkart_selling_price": 11999.00, "stock_count": 20}`
fn normalize_flipkart(data: &Value, currency: &str) -> PlatformQuote {
    PlatformQuote {
        platform: Platform::Flipkart.display_name().to_owned(),
        price: price_field(data.get("flipkart_selling_price")),
        stock: stock_field(data.get("stock_count")),
        currency: currency.to_owned(),
    }
}

/// Extracts a non-negative decimal price from a JSON field that may be a
/// string (Shopify) or a number (Amazon, Flipkart). Anything else, including
/// unparseable strings and negative values, degrades to zero.
fn price_field(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::String(s)) => s.trim().parse::<Decimal>().ok(),
        // serde_json prints numbers with their original precision, so going
        // through the text form avoids f64 rounding on values like 11499.00.
        Some(Value::Number(n)) => n.to_string().parse::<Decimal>().ok(),
        _ => None,
    };
    parsed.filter(|p| !p.is_sign_negative()).unwrap_or(Decimal::ZERO)
}

/// Extracts a non-negative integer stock count. Negative, fractional, or
/// missing values degrade to zero.
fn stock_field(value: Option<&Value>) -> u32 {
    value
        .and_then(Value::as_u64)
        .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
}
