//! Write-only client for the target import API.
//!
//! # Endpoint
//!
//! - `POST {base}/target_api/import/` - batch product import
//!
//! Authentication is a static bearer token attached as a default header.
//! The import API reports per-record validation detail in the body of a
//! 400 response, so a 400 is surfaced as a rejected [`SubmissionResult`]
//! rather than an error; the body stays opaque pass-through.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use catalog_migrate_core::NormalizedProduct;

use crate::config::MigrateConfig;

const IMPORT_PATH: &str = "target_api/import/";

/// Errors that can occur when talking to the target import API.
#[derive(Debug, Error)]
pub enum TargetError {
    /// Network-level failure (DNS, TLS, timeout, connection reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The target returned a non-2xx, non-400 status.
    #[error("target API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the JSON we expect.
    #[error("parse error: {0}")]
    Parse(String),

    /// The bearer token contains characters invalid in an HTTP header.
    #[error("invalid bearer token: {0}")]
    InvalidToken(String),

    /// Endpoint URL construction failed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Outcome of a batch submission.
///
/// The body is the server's response verbatim; the client never
/// reinterprets per-record acceptance detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    /// HTTP status of the import call; `None` when no call was made.
    pub status: Option<u16>,
    /// Parsed response body, opaque pass-through.
    pub body: Value,
    /// Number of products submitted.
    pub submitted: usize,
}

impl SubmissionResult {
    /// The no-op result for an empty batch.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            status: None,
            body: Value::Null,
            submitted: 0,
        }
    }

    /// Whether no network call was made.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.status.is_none()
    }

    /// Whether the import API rejected the batch (HTTP 400).
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.status == Some(400)
    }
}

/// Request body for the import endpoint.
#[derive(Debug, Serialize)]
struct ImportRequest<'a> {
    products: &'a [NormalizedProduct],
}

/// Target import API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct TargetClient {
    inner: Arc<TargetClientInner>,
}

struct TargetClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl TargetClient {
    /// Create a new target client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the bearer token is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &MigrateConfig) -> Result<Self, TargetError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.target_api_token.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| TargetError::InvalidToken(e.to_string()))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(TargetClientInner {
                client,
                base_url: config.target_base_url.clone(),
            }),
        })
    }

    /// Submit a batch of normalized products to the import endpoint.
    ///
    /// An empty batch is a no-op: no network call is made and
    /// [`SubmissionResult::empty`] is returned.
    ///
    /// # Errors
    ///
    /// Returns `TargetError` on transport failure or on any non-2xx status
    /// other than 400 (whose body carries validation detail and is returned
    /// inside the result).
    #[instrument(skip(self, products), fields(batch_size = products.len()))]
    pub async fn submit_batch(
        &self,
        products: &[NormalizedProduct],
    ) -> Result<SubmissionResult, TargetError> {
        if products.is_empty() {
            tracing::info!("empty batch, skipping import call");
            return Ok(SubmissionResult::empty());
        }

        let url = self.inner.base_url.join(IMPORT_PATH)?;
        let request = ImportRequest { products };

        let response = self.inner.client.post(url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let result = decode_submit_response(status, &body, products.len())?;
        if result.is_rejected() {
            tracing::warn!(status = 400, "import API rejected the batch");
        } else {
            tracing::info!(submitted = products.len(), "batch accepted");
        }
        Ok(result)
    }
}

impl std::fmt::Debug for TargetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Decode an import response: parsed body on 2xx *and* 400, status error on
/// anything else.
///
/// Pure so that the 400-with-body contract is testable without a server.
fn decode_submit_response(
    status: StatusCode,
    body: &str,
    submitted: usize,
) -> Result<SubmissionResult, TargetError> {
    if status.is_success() || status == StatusCode::BAD_REQUEST {
        let body = serde_json::from_str(body)
            .map_err(|e| TargetError::Parse(format!("import response: {e}")))?;
        return Ok(SubmissionResult {
            status: Some(status.as_u16()),
            body,
            submitted,
        });
    }

    Err(TargetError::Status {
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_2xx_returns_body() {
        let result = decode_submit_response(
            StatusCode::OK,
            r#"{"accepted": 3, "rejected": 0}"#,
            3,
        )
        .expect("decode");
        assert_eq!(result.status, Some(200));
        assert_eq!(result.body["accepted"], 3);
        assert!(!result.is_rejected());
        assert!(!result.is_noop());
    }

    #[test]
    fn test_decode_400_returns_error_body_not_error() {
        let result = decode_submit_response(
            StatusCode::BAD_REQUEST,
            r#"{"errors": [{"productId": "XX-0001", "reason": "missing price"}]}"#,
            1,
        )
        .expect("400 carries a body");
        assert!(result.is_rejected());
        assert_eq!(result.body["errors"][0]["productId"], "XX-0001");
    }

    #[test]
    fn test_decode_other_non_2xx_is_status_error() {
        let err = decode_submit_response(StatusCode::INTERNAL_SERVER_ERROR, "oops", 1)
            .expect_err("500");
        match err {
            TargetError::Status { status, .. } => assert_eq!(status, 500),
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_unparseable_2xx_body_is_parse_error() {
        let err =
            decode_submit_response(StatusCode::OK, "not json", 1).expect_err("garbage body");
        assert!(matches!(err, TargetError::Parse(_)));
    }

    #[test]
    fn test_empty_result_is_noop() {
        let result = SubmissionResult::empty();
        assert!(result.is_noop());
        assert!(!result.is_rejected());
        assert_eq!(result.submitted, 0);
    }

    #[test]
    fn test_target_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TargetClient>();
    }
}
