//! Shared HTTP plumbing for the platform adapters: request execution with
//! typed per-status error mapping.

use std::time::Duration;

use pricelens_core::Platform;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::adapter::FetchSettings;
use crate::error::SourceError;

/// Builds the `reqwest::Client` shared by all adapters of one aggregator.
///
/// The client-level timeout is a coarse backstop; the aggregator applies the
/// authoritative per-fetch bound around the whole retry loop.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the client cannot be constructed.
pub(crate) fn build_client(settings: &FetchSettings) -> Result<Client, SourceError> {
    let client = Client::builder()
        .timeout(Duration::from_millis(settings.timeout_ms))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(&settings.user_agent)
        .build()?;
    Ok(client)
}

/// Sends `request` and maps the response to a JSON payload or a typed error.
///
/// - 429 → [`SourceError::RateLimited`] with the `Retry-After` value (60s
///   when the header is missing or unparseable).
/// - 404 → [`SourceError::NotFound`].
/// - other non-2xx → [`SourceError::UnexpectedStatus`].
/// - unparseable body → [`SourceError::Deserialize`].
pub(crate) async fn execute_json(
    platform: Platform,
    url: &str,
    request: RequestBuilder,
) -> Result<Value, SourceError> {
    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(SourceError::RateLimited {
            platform,
            retry_after_secs,
        });
    }

    if status == StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound {
            url: url.to_owned(),
        });
    }

    if !status.is_success() {
        return Err(SourceError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str::<Value>(&body).map_err(|e| SourceError::Deserialize {
        context: format!("{platform} product payload from {url}"),
        source: e,
    })
}
