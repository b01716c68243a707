//! Concurrent fan-out across all configured source adapters.

use std::time::Duration;

use futures::future::join_all;
use pricelens_core::{Platform, RawPayload};
use reqwest::Client;

use crate::adapter::{FetchSettings, Gateway, SourceAdapter};
use crate::amazon::AmazonAdapter;
use crate::client::build_client;
use crate::error::SourceError;
use crate::flipkart::FlipkartAdapter;
use crate::shopify::ShopifyAdapter;

/// Fans a SKU fetch out to every registered adapter at once and collects
/// whatever arrives.
///
/// Failure policy is per-adapter isolation: a fetch that errors or exceeds
/// the per-adapter timeout is logged and omitted from the result, so one
/// slow or broken platform degrades the aggregate instead of failing it.
/// Results come back in adapter registration order regardless of which
/// platform responds first, keeping downstream normalization deterministic.
///
/// The aggregator owns the HTTP client its adapters share; dropping the
/// aggregator at the end of the request scope releases it, fetch failures
/// included.
pub struct Aggregator {
    adapters: Vec<Box<dyn SourceAdapter>>,
    fetch_timeout: Duration,
}

impl Aggregator {
    /// Builds one adapter per gateway record, in gateway order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built, or
    /// [`SourceError::InvalidEndpoint`] if a gateway's endpoint URL does not
    /// parse.
    pub fn from_gateways(
        gateways: &[Gateway],
        settings: &FetchSettings,
    ) -> Result<Self, SourceError> {
        let client = build_client(settings)?;
        let mut adapters: Vec<Box<dyn SourceAdapter>> = Vec::with_capacity(gateways.len());
        for gateway in gateways {
            adapters.push(build_adapter(client.clone(), gateway, settings)?);
        }
        Ok(Self::with_adapters(
            adapters,
            Duration::from_millis(settings.timeout_ms),
        ))
    }

    /// Assembles an aggregator from pre-built adapters. Useful for tests and
    /// callers that construct adapters themselves.
    #[must_use]
    pub fn with_adapters(adapters: Vec<Box<dyn SourceAdapter>>, fetch_timeout: Duration) -> Self {
        Self {
            adapters,
            fetch_timeout,
        }
    }

    /// Platforms registered on this aggregator, in registration order.
    #[must_use]
    pub fn platforms(&self) -> Vec<Platform> {
        self.adapters.iter().map(|a| a.platform()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Fetches `sku` from every adapter concurrently and returns the raw
    /// payloads of the adapters that succeeded, in registration order.
    ///
    /// Total wall-clock time is bounded by the slowest adapter (at most the
    /// per-adapter timeout), never the sum of all latencies. An empty result
    /// means every source was down or none was configured.
    pub async fn aggregate_product(&self, sku: &str) -> Vec<RawPayload> {
        let timeout = self.fetch_timeout;
        let fetches = self.adapters.iter().map(|adapter| async move {
            let platform = adapter.platform();
            let result = match tokio::time::timeout(timeout, adapter.fetch(sku)).await {
                Ok(result) => result,
                Err(_) => Err(SourceError::Timeout {
                    platform,
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                }),
            };
            match result {
                Ok(payload) => Some(payload),
                Err(err) => {
                    tracing::warn!(
                        platform = %platform,
                        sku,
                        error = %err,
                        "source fetch failed, omitting platform from aggregate"
                    );
                    None
                }
            }
        });

        // join_all is the all-complete barrier; per-future error capture
        // above means no sibling result is ever discarded.
        join_all(fetches).await.into_iter().flatten().collect()
    }
}

fn build_adapter(
    client: Client,
    gateway: &Gateway,
    settings: &FetchSettings,
) -> Result<Box<dyn SourceAdapter>, SourceError> {
    Ok(match gateway.platform {
        Platform::Shopify => Box::new(ShopifyAdapter::new(client, gateway, settings)?),
        Platform::Amazon => Box::new(AmazonAdapter::new(client, gateway, settings)?),
        Platform::Flipkart => Box::new(FlipkartAdapter::new(client, gateway, settings)?),
    })
}
