//! Blocking HTTP plumbing shared by the render and upload clients.

use crate::error::{ApiError, ApiResult};
use reqwest::blocking::{Client, Response};
use std::time::Duration;

/// Builds the blocking client used for every outbound call.
///
/// `None` leaves requests without a timeout.
pub(crate) fn build_client(timeout: Option<Duration>) -> ApiResult<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Passes 2xx responses through and turns everything else into `ApiError::Status`.
pub(crate) fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(status_error(status.as_u16(), &body))
}

/// Extracts the `detail` field of an error body.
///
/// Non-string details (validation error lists) are rendered as JSON.
pub(crate) fn status_error(status: u16, body: &str) -> ApiError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| match v.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        })
        .unwrap_or_else(|| "Unknown error".to_string());
    ApiError::Status { status, detail }
}
