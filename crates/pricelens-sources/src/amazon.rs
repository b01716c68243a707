//! Amazon SP-API catalog source adapter.

use async_trait::async_trait;
use pricelens_core::{Platform, RawPayload};
use reqwest::Client;

use crate::adapter::{validate_endpoint, FetchSettings, Gateway, SourceAdapter};
use crate::client::execute_json;
use crate::error::SourceError;
use crate::retry::retry_with_backoff;

/// Fetches catalog item data from the Amazon SP-API.
///
/// The catalog payload carries pricing but not inventory; inventory is a
/// separate SP-API surface the normalizer papers over with a placeholder.
pub struct AmazonAdapter {
    client: Client,
    access_token: String,
    base_url: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl AmazonAdapter {
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidEndpoint`] if the gateway's endpoint URL
    /// does not parse.
    pub fn new(
        client: Client,
        gateway: &Gateway,
        settings: &FetchSettings,
    ) -> Result<Self, SourceError> {
        let base_url = validate_endpoint(Platform::Amazon, &gateway.endpoint_url)?;
        Ok(Self {
            client,
            access_token: gateway.api_key.clone(),
            base_url,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    fn item_url(&self, sku: &str) -> String {
        format!("{}/catalog/2022-04-01/items/{sku}", self.base_url)
    }
}

#[async_trait]
impl SourceAdapter for AmazonAdapter {
    fn platform(&self) -> Platform {
        Platform::Amazon
    }

    async fn fetch(&self, sku: &str) -> Result<RawPayload, SourceError> {
        let url = self.item_url(sku);
        let data = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let request = self.client.get(&url).bearer_auth(&self.access_token);
            execute_json(Platform::Amazon, &url, request)
        })
        .await?;
        Ok(RawPayload::new(Platform::Amazon, data))
    }
}
