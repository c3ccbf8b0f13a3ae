//! Forwarding to the backend chat-completions endpoint.
//!
//! One attempt per inbound request; retry policy belongs to the caller.
//! Streamed bodies are exposed as a forward-only chunk sequence in arrival
//! order, never buffered or parsed here.

use crate::config::ProxyConfig;
use crate::error::{ProxyError, Result};

use bytes::Bytes;
use futures::stream::Stream;
use futures::StreamExt;
use serde::Serialize;
use std::pin::Pin;
use std::time::Duration;

/// Whole-exchange timeout (connect + read) applied to every backend call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Raw byte chunks from the backend, in arrival order.
pub type ByteStream = Pin<Box<dyn Stream<Item = std::result::Result<Bytes, std::io::Error>> + Send>>;

/// Outcome of a successful backend call.
pub enum RelayBody {
    /// Complete buffered body of a non-streamed response.
    Full(Bytes),
    /// Live chunk sequence of a streamed response.
    Stream(ByteStream),
}

/// POST the translated request to `<base>/chat/completions` with the bearer
/// credential and hand back the body, buffered or live depending on `stream`.
///
/// A non-2xx status is detected before any chunk is forwarded and surfaced
/// as [`ProxyError::Upstream`] with the backend's status and raw error body.
/// Transport failures become [`ProxyError::Unavailable`].
pub async fn forward<T: Serialize + ?Sized>(
    body: &T,
    stream: bool,
    config: &ProxyConfig,
    client: &reqwest::Client,
) -> Result<RelayBody> {
    let api_key = config.resolve_api_key()?;
    let base_url = config.effective_base_url()?;
    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));

    tracing::debug!(%url, stream, "POST to backend");

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {api_key}"))
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| ProxyError::unavailable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "Backend returned error status");
        return Err(ProxyError::upstream(status.as_u16(), body));
    }

    if stream {
        let chunks = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(std::io::Error::other));
        Ok(RelayBody::Stream(Box::pin(chunks)))
    } else {
        let body = response
            .bytes()
            .await
            .map_err(|e| ProxyError::unavailable(e.to_string()))?;
        Ok(RelayBody::Full(body))
    }
}
