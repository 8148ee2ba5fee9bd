// handlers/public/download.rs - GET /api/download?requestId= handler

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::{DownloadContext, WorkflowError};
use crate::state::AppState;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    #[serde(rename = "requestId")]
    pub request_id: Option<String>,
}

/**
 * GET /api/download?requestId=<uuid> - Redirect an approved request to its archive
 *
 * 302 to the resolved link. 400 without `requestId`, 404 for unknown ids or
 * when no usable link exists, 403 when the request is not approved or the
 * link has expired.
 */
pub async fn download_get(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let raw_id = query
        .request_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Request ID is required"))?;
    let request_id =
        Uuid::parse_str(raw_id.trim()).map_err(|_| ApiError::not_found("Request not found"))?;

    let target = state
        .requests
        .download(request_id, caller_context(&headers))
        .await
        .map_err(|e| match e {
            WorkflowError::InvalidLink(link) => {
                tracing::warn!(%request_id, error = %link, "Stored download link cannot be resolved");
                ApiError::not_found("Download link unavailable")
            }
            other => ApiError::from(other),
        })?;

    let location = HeaderValue::from_str(&target).map_err(|_| {
        tracing::error!(%request_id, "Resolved download link is not a valid header value");
        ApiError::internal_server_error("Download link unavailable")
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

fn caller_context(headers: &HeaderMap) -> DownloadContext {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let ip_address = header_str("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header_str("x-real-ip"))
        .unwrap_or(UNKNOWN)
        .to_string();

    let user_agent = header_str("user-agent").unwrap_or(UNKNOWN).to_string();

    DownloadContext {
        ip_address,
        user_agent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_forwarded_address_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        headers.insert("user-agent", HeaderValue::from_static("Mozilla/5.0"));
        let ctx = caller_context(&headers);
        assert_eq!(ctx.ip_address, "203.0.113.7");
        assert_eq!(ctx.user_agent, "Mozilla/5.0");
    }

    #[test]
    fn falls_back_to_real_ip_then_unknown() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(caller_context(&headers).ip_address, "10.0.0.2");

        let ctx = caller_context(&HeaderMap::new());
        assert_eq!(ctx.ip_address, "unknown");
        assert_eq!(ctx.user_agent, "unknown");
    }
}
