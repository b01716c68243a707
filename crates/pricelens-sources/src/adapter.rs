//! The source adapter seam and its construction inputs.

use async_trait::async_trait;
use pricelens_core::{AppConfig, Platform, RawPayload};

use crate::error::SourceError;

/// A deployed platform integration: credentials plus the API endpoint to hit.
///
/// Gateways are persisted by the API layer and injected into the
/// [`crate::Aggregator`] at construction; there is no process-wide registry.
#[derive(Debug, Clone)]
pub struct Gateway {
    pub platform: Platform,
    pub api_key: String,
    pub api_secret: Option<String>,
    pub endpoint_url: String,
}

/// Knobs applied to every adapter fetch.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Per-adapter wall-clock bound enforced by the aggregator.
    pub timeout_ms: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl FetchSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_ms: config.source_timeout_ms,
            user_agent: config.source_user_agent.clone(),
            max_retries: config.source_max_retries,
            backoff_base_ms: config.source_backoff_base_ms,
        }
    }
}

/// Capability to fetch one SKU's raw data from one platform.
///
/// Implementations must be independently awaitable; the aggregator runs them
/// concurrently and an adapter must never block its siblings.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// The platform this adapter integrates with.
    fn platform(&self) -> Platform;

    /// Fetches the raw payload for `sku`, tagged with this adapter's platform.
    async fn fetch(&self, sku: &str) -> Result<RawPayload, SourceError>;
}

/// Validates a gateway endpoint and returns it with any trailing slash
/// removed, so adapters can append paths without double slashes.
pub(crate) fn validate_endpoint(platform: Platform, endpoint_url: &str) -> Result<String, SourceError> {
    reqwest::Url::parse(endpoint_url)
        .map_err(|e| SourceError::InvalidEndpoint {
            platform,
            url: endpoint_url.to_owned(),
            reason: e.to_string(),
        })
        .map(|_| endpoint_url.trim_end_matches('/').to_owned())
}
