mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use bytes::Bytes;
use tracing::debug;

use crate::error::AnalyzeError;

/// Downloads `url` and returns the response body.
///
/// Any non-success status is an [`AnalyzeError::Retrieval`]; the body of an
/// error page is never handed back to the caller.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes, AnalyzeError> {
    let parsed: reqwest::Url = url.parse().map_err(|e| AnalyzeError::Retrieval {
        url: url.to_string(),
        reason: format!("invalid URL: {e}"),
    })?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client
        .execute(req)
        .await
        .map_err(|e| AnalyzeError::Retrieval {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(AnalyzeError::Retrieval {
            url: url.to_string(),
            reason: format!("HTTP {status}"),
        });
    }

    let bytes = resp.bytes().await.map_err(|e| AnalyzeError::Retrieval {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    debug!(url, bytes = bytes.len(), "Resource fetched");

    Ok(bytes)
}
