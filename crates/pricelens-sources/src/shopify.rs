//! Shopify Admin API source adapter.

use async_trait::async_trait;
use pricelens_core::{Platform, RawPayload};
use reqwest::Client;

use crate::adapter::{validate_endpoint, FetchSettings, Gateway, SourceAdapter};
use crate::client::execute_json;
use crate::error::SourceError;
use crate::retry::retry_with_backoff;

/// Fetches product data from a Shopify store's Admin API.
///
/// Authenticates with the store access token via the `X-Shopify-Access-Token`
/// header. Transient failures (429, network errors) are retried with
/// exponential backoff.
#[derive(Debug)]
pub struct ShopifyAdapter {
    client: Client,
    access_token: String,
    base_url: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl ShopifyAdapter {
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidEndpoint`] if the gateway's endpoint URL
    /// does not parse.
    pub fn new(
        client: Client,
        gateway: &Gateway,
        settings: &FetchSettings,
    ) -> Result<Self, SourceError> {
        let base_url = validate_endpoint(Platform::Shopify, &gateway.endpoint_url)?;
        Ok(Self {
            client,
            access_token: gateway.api_key.clone(),
            base_url,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    fn product_url(&self, sku: &str) -> String {
        format!("{}/admin/api/2024-01/products/{sku}.json", self.base_url)
    }
}

#[async_trait]
impl SourceAdapter for ShopifyAdapter {
    fn platform(&self) -> Platform {
        Platform::Shopify
    }

    async fn fetch(&self, sku: &str) -> Result<RawPayload, SourceError> {
        let url = self.product_url(sku);
        let data = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let request = self
                .client
                .get(&url)
                .header("X-Shopify-Access-Token", &self.access_token);
            execute_json(Platform::Shopify, &url, request)
        })
        .await?;
        Ok(RawPayload::new(Platform::Shopify, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings() -> FetchSettings {
        FetchSettings {
            timeout_ms: 3000,
            user_agent: "pricelens-test/0.1".to_owned(),
            max_retries: 0,
            backoff_base_ms: 0,
        }
    }

    fn adapter(base_url: &str, max_retries: u32) -> ShopifyAdapter {
        let gateway = Gateway {
            platform: Platform::Shopify,
            api_key: "shpat_test".to_owned(),
            api_secret: None,
            endpoint_url: base_url.to_owned(),
        };
        let mut settings = settings();
        settings.max_retries = max_retries;
        ShopifyAdapter::new(Client::new(), &gateway, &settings).expect("adapter")
    }

    #[test]
    fn product_url_shape() {
        let adapter = adapter("https://buds.myshopify.com/", 0);
        assert_eq!(
            adapter.product_url("BUDS-V2-BLK"),
            "https://buds.myshopify.com/admin/api/2024-01/products/BUDS-V2-BLK.json"
        );
    }

    #[tokio::test]
    async fn fetch_returns_tagged_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/api/2024-01/products/BUDS-V2-BLK.json"))
            .and(header("X-Shopify-Access-Token", "shpat_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Ultra Wireless Buds v2",
                "variants": [{"price": "12999.00", "inventory_quantity": 45}]
            })))
            .mount(&server)
            .await;

        let payload = adapter(&server.uri(), 0)
            .fetch("BUDS-V2-BLK")
            .await
            .expect("fetch");
        assert_eq!(payload.source, "shopify");
        assert_eq!(
            payload.data["variants"][0]["price"].as_str(),
            Some("12999.00")
        );
    }

    #[tokio::test]
    async fn fetch_maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = adapter(&server.uri(), 0)
            .fetch("MISSING-SKU")
            .await
            .unwrap_err();
        assert!(
            matches!(err, SourceError::NotFound { ref url } if url.contains("MISSING-SKU")),
            "expected NotFound, got: {err:?}"
        );
    }

    #[tokio::test]
    async fn fetch_maps_429_to_rate_limited_with_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "17"))
            .mount(&server)
            .await;

        let err = adapter(&server.uri(), 0).fetch("SKU-1").await.unwrap_err();
        assert!(
            matches!(
                err,
                SourceError::RateLimited {
                    platform: Platform::Shopify,
                    retry_after_secs: 17
                }
            ),
            "expected RateLimited, got: {err:?}"
        );
    }

    #[tokio::test]
    async fn fetch_maps_500_to_unexpected_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = adapter(&server.uri(), 0).fetch("SKU-1").await.unwrap_err();
        assert!(
            matches!(err, SourceError::UnexpectedStatus { status: 500, .. }),
            "expected UnexpectedStatus(500), got: {err:?}"
        );
    }

    #[tokio::test]
    async fn fetch_maps_bad_body_to_deserialize() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = adapter(&server.uri(), 0).fetch("SKU-1").await.unwrap_err();
        assert!(
            matches!(err, SourceError::Deserialize { .. }),
            "expected Deserialize, got: {err:?}"
        );
    }

    #[tokio::test]
    async fn fetch_retries_rate_limited_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"variants": []})))
            .mount(&server)
            .await;

        let payload = adapter(&server.uri(), 1).fetch("SKU-1").await.expect("fetch");
        assert_eq!(payload.source, "shopify");
    }

    #[test]
    fn rejects_invalid_endpoint() {
        let gateway = Gateway {
            platform: Platform::Shopify,
            api_key: "k".to_owned(),
            api_secret: None,
            endpoint_url: "not-a-url".to_owned(),
        };
        let err = ShopifyAdapter::new(Client::new(), &gateway, &settings()).unwrap_err();
        assert!(matches!(err, SourceError::InvalidEndpoint { .. }));
    }
}
