use axum::{extract::State, Extension, Json};
use pricelens_core::Platform;
use serde::{Deserialize, Serialize};

use crate::middleware::{CurrentUser, RequestId};

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct DeployGatewayRequest {
    platform: String,
    api_key: String,
    #[serde(default)]
    api_secret: Option<String>,
    endpoint_url: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DeployGatewayResponse {
    gateway_id: i64,
    platform: String,
    message: String,
}

/// `POST /api/v1/gateways/deploy` — registers or replaces the credentials
/// for one platform. The gateway participates in aggregation from the next
/// request onward; nothing is cached across requests.
pub(super) async fn deploy_gateway(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<DeployGatewayRequest>,
) -> Result<Json<ApiResponse<DeployGatewayResponse>>, ApiError> {
    let platform = validate_deploy_request(&body)
        .map_err(|reason| ApiError::new(req_id.0.clone(), "validation_error", reason))?;

    let gateway = pricelens_db::NewGateway {
        platform: platform.tag().to_owned(),
        api_key: body.api_key,
        api_secret: body.api_secret,
        endpoint_url: body.endpoint_url.trim_end_matches('/').to_owned(),
    };
    let gateway_id = pricelens_db::upsert_gateway(&state.pool, &gateway)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(
        gateway_id,
        platform = %platform,
        deployed_by = user.as_ref().map_or("anonymous", |u| u.email.as_str()),
        "gateway deployed"
    );

    Ok(Json(ApiResponse {
        data: DeployGatewayResponse {
            gateway_id,
            platform: platform.tag().to_owned(),
            message: format!("tunnel to {} established", platform.display_name()),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Checks a deploy request and resolves its platform tag. Returns a
/// caller-facing reason on rejection.
fn validate_deploy_request(body: &DeployGatewayRequest) -> Result<Platform, String> {
    let Some(platform) = Platform::from_tag(&body.platform) else {
        return Err(format!("unsupported platform tag: {}", body.platform));
    };
    if body.api_key.trim().is_empty() {
        return Err("api_key must not be empty".to_owned());
    }
    if !body.endpoint_url.starts_with("http://") && !body.endpoint_url.starts_with("https://") {
        return Err("endpoint_url must be an http(s) URL".to_owned());
    }
    Ok(platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(platform: &str, api_key: &str, endpoint_url: &str) -> DeployGatewayRequest {
        DeployGatewayRequest {
            platform: platform.to_owned(),
            api_key: api_key.to_owned(),
            api_secret: None,
            endpoint_url: endpoint_url.to_owned(),
        }
    }

    #[test]
    fn valid_request_resolves_platform() {
        let req = request("shopify", "shpat_abc", "https://shop.example.com");
        assert_eq!(validate_deploy_request(&req), Ok(Platform::Shopify));
    }

    #[test]
    fn unknown_platform_tag_is_rejected() {
        let req = request("ebay", "key", "https://api.example.com");
        let err = validate_deploy_request(&req).expect_err("should reject");
        assert!(err.contains("ebay"));
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let req = request("amazon", "   ", "https://api.example.com");
        let err = validate_deploy_request(&req).expect_err("should reject");
        assert!(err.contains("api_key"));
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let req = request("flipkart", "key", "ftp://files.example.com");
        let err = validate_deploy_request(&req).expect_err("should reject");
        assert!(err.contains("endpoint_url"));
    }

    #[test]
    fn deploy_request_deserializes_without_secret() {
        let body = r#"{"platform":"shopify","api_key":"k","endpoint_url":"https://s.example.com"}"#;
        let req: DeployGatewayRequest = serde_json::from_str(body).expect("deserialize");
        assert_eq!(req.platform, "shopify");
        assert_eq!(req.api_secret, None);
    }
}
