//! Errors encountered during API requests or reported by the remote server.
use anyhow::Result;
use reqwest::Response;
use serde::de::DeserializeOwned;

/// The server rejected or failed to process the API request.
///
/// The status line and raw response body are kept verbatim: the control
/// plane does not return a structured error payload so the body is the only
/// diagnostic available.
#[derive(Debug, thiserror::Error)]
#[error("API request returned unexpected status {status} with response: {body:?}")]
pub struct ApiError {
    /// Status line of the response.
    pub status: String,

    /// Raw response body, possibly empty.
    pub body: String,
}

/// Invalid API response received.
#[derive(Debug, thiserror::Error)]
#[error("invalid API response received: {response}")]
pub struct InvalidResponse {
    pub response: String,
}

/// The resource is not available, or access to it is restricted.
#[derive(Debug, thiserror::Error)]
#[error("the resource is not available, or access to it is restricted")]
pub struct ResourceNotFound;

/// Decode the body of an HTTP response and correctly handle errors in the process.
///
/// - 404 responses fail with [`ResourceNotFound`] so callers can map them to
///   their operation's not-found semantics (absent resource, idempotent delete).
/// - Other non-2xx responses fail with [`ApiError`] carrying status and body.
/// - Undecodable success payloads fail with [`InvalidResponse`], never a default.
pub async fn inspect<T>(response: Response) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let code = response.status();
    let text = response.text().await?;

    if matches!(code, reqwest::StatusCode::NOT_FOUND) {
        anyhow::bail!(ResourceNotFound);
    }

    if code.is_client_error() || code.is_server_error() {
        anyhow::bail!(ApiError {
            status: code.to_string(),
            body: text,
        });
    }

    // On success decode the payload, if any, into the requested type.
    if text.is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<T>(&text)
        .map_err(|error| {
            let decode = InvalidResponse { response: text };
            anyhow::anyhow!(error).context(decode)
        })
        .map(Some)
}
