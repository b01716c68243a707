//! Flipkart Seller API source adapter.

use async_trait::async_trait;
use pricelens_core::{Platform, RawPayload};
use reqwest::Client;

use crate::adapter::{validate_endpoint, FetchSettings, Gateway, SourceAdapter};
use crate::client::execute_json;
use crate::error::SourceError;
use crate::retry::retry_with_backoff;

pub struct FlipkartAdapter {
    client: Client,
    access_token: String,
    base_url: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl FlipkartAdapter {
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidEndpoint`] if the gateway's endpoint URL
    /// does not parse.
    pub fn new(
        client: Client,
        gateway: &Gateway,
        settings: &FetchSettings,
    ) -> Result<Self, SourceError> {
        let base_url = validate_endpoint(Platform::Flipkart, &gateway.endpoint_url)?;
        Ok(Self {
            client,
            access_token: gateway.api_key.clone(),
            base_url,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    fn listing_url(&self, sku: &str) -> String {
        format!("{}/sellers/listings/v3/{sku}", self.base_url)
    }
}

#[async_trait]
impl SourceAdapter for FlipkartAdapter {
    fn platform(&self) -> Platform {
        Platform::Flipkart
    }

    async fn fetch(&self, sku: &str) -> Result<RawPayload, SourceError> {
        let url = self.listing_url(sku);
        let data = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let request = self.client.get(&url).bearer_auth(&self.access_token);
            execute_json(Platform::Flipkart, &url, request)
        })
        .await?;
        Ok(RawPayload::new(Platform::Flipkart, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(base_url: &str) -> FlipkartAdapter {
        let gateway = Gateway {
            platform: Platform::Flipkart,
            api_key: "fk_test".to_owned(),
            api_secret: None,
            endpoint_url: base_url.to_owned(),
        };
        let settings = FetchSettings {
            timeout_ms: 3000,
            user_agent: "pricelens-test/0.1".to_owned(),
            max_retries: 0,
            backoff_base_ms: 0,
        };
        FlipkartAdapter::new(Client::new(), &gateway, &settings).expect("adapter")
    }

    #[test]
    fn listing_url_shape() {
        let adapter = adapter("https://api.flipkart.example.com/");
        assert_eq!(
            adapter.listing_url("OFFICE-09"),
            "https://api.flipkart.example.com/sellers/listings/v3/OFFICE-09"
        );
    }

    #[tokio::test]
    async fn fetch_returns_tagged_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sellers/listings/v3/OFFICE-09"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "flipkart_selling_price": 11999.00,
                "stock_count": 20
            })))
            .mount(&server)
            .await;

        let payload = adapter(&server.uri()).fetch("OFFICE-09").await.expect("fetch");
        assert_eq!(payload.source, "flipkart");
        assert_eq!(payload.data["stock_count"].as_u64(), Some(20));
    }

    #[tokio::test]
    async fn fetch_maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = adapter(&server.uri()).fetch("NOPE").await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
    }
}
