//! Domain model shared across the aggregation pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The closed set of e-commerce platforms we integrate with.
///
/// Wire payloads carry a lowercase string tag; [`Platform::from_tag`] parses
/// it and returns `None` for tags we do not recognize so callers can skip
/// them instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Shopify,
    Amazon,
    Flipkart,
}

impl Platform {
    /// All platforms, in canonical registration order.
    pub const ALL: [Platform; 3] = [Platform::Shopify, Platform::Amazon, Platform::Flipkart];

    /// Parses a lowercase wire tag. Unknown tags yield `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "shopify" => Some(Platform::Shopify),
            "amazon" => Some(Platform::Amazon),
            "flipkart" => Some(Platform::Flipkart),
            _ => None,
        }
    }

    /// The lowercase wire tag for this platform.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Platform::Shopify => "shopify",
            Platform::Amazon => "amazon",
            Platform::Flipkart => "flipkart",
        }
    }

    /// Human-readable platform name used in unified output.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Shopify => "Shopify",
            Platform::Amazon => "Amazon",
            Platform::Flipkart => "Flipkart",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A raw, source-specific payload as returned by one platform's API,
/// tagged with its origin. Consumed once during unification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPayload {
    pub source: String,
    pub data: Value,
}

impl RawPayload {
    #[must_use]
    pub fn new(platform: Platform, data: Value) -> Self {
        Self {
            source: platform.tag().to_owned(),
            data,
        }
    }
}

/// One platform's normalized contribution to a unified product: name,
/// price, stock, all in the canonical display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformQuote {
    pub platform: String,
    pub price: Decimal,
    pub stock: u32,
    pub currency: String,
}

/// The cross-platform-comparable view of one SKU, built fresh per request.
///
/// Invariants: `lowest_price` is the minimum quote price (0 when no quotes);
/// `price_gap` is max minus min (0 when no quotes), so it is never negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedProduct {
    pub product_name: String,
    pub sku: String,
    pub platforms: Vec<PlatformQuote>,
    pub lowest_price: Decimal,
    pub price_gap: Decimal,
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_from_tag_round_trips() {
        for platform in Platform::ALL {
            assert_eq!(Platform::from_tag(platform.tag()), Some(platform));
        }
    }

    #[test]
    fn platform_from_tag_rejects_unknown() {
        assert_eq!(Platform::from_tag("ebay"), None);
        assert_eq!(Platform::from_tag(""), None);
        assert_eq!(Platform::from_tag("Shopify"), None);
    }

    #[test]
    fn raw_payload_tags_source() {
        let payload = RawPayload::new(Platform::Amazon, serde_json::json!({}));
        assert_eq!(payload.source, "amazon");
    }

    #[test]
    fn platform_serializes_as_lowercase_tag() {
        let json = serde_json::to_string(&Platform::Flipkart).expect("serialize");
        assert_eq!(json, "\"flipkart\"");
    }
}
