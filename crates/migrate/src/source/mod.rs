//! Read-only client for the source catalog API.
//!
//! # Endpoints
//!
//! - `GET {base}/source_api/products/` - paginated product listing
//! - `GET {base}/source_api/products/{id}/` - single product detail
//! - `GET {base}/source_api/inventory-status/` - inventory for a set of ids
//!
//! The listing is paginated with `limit`/`offset` query parameters; the
//! client always walks pages until the catalog is exhausted. Inventory ids
//! are passed comma-joined in the `product_ids` parameter, per the source
//! contract.

mod types;

pub use types::{InventoryRecord, ProductPage, SourceProduct};

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::MigrateConfig;

use self::types::InventoryPage;

const PRODUCTS_PATH: &str = "source_api/products/";
const INVENTORY_PATH: &str = "source_api/inventory-status/";

/// Upper bound on listing pages per walk. A source that ignores `offset`
/// and replays a full page forever would otherwise never terminate.
const MAX_LISTING_PAGES: u32 = 10_000;

/// Errors that can occur when talking to the source catalog API.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network-level failure (DNS, TLS, timeout, connection reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The source returned a non-2xx status.
    #[error("source API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the JSON we expect.
    #[error("parse error: {0}")]
    Parse(String),

    /// Endpoint URL construction failed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Optional filters for the product listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    /// Restrict to a source-side category.
    pub category: Option<String>,
    /// Restrict to a source-side status value.
    pub status: Option<String>,
}

/// Source catalog API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct SourceClient {
    inner: Arc<SourceClientInner>,
}

struct SourceClientInner {
    client: reqwest::Client,
    base_url: Url,
    page_size: u32,
}

impl SourceClient {
    /// Create a new source client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &MigrateConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(SourceClientInner {
                client,
                base_url: config.source_base_url.clone(),
                page_size: config.page_size,
            }),
        })
    }

    /// Fetch the complete product catalog, walking listing pages until
    /// exhausted.
    ///
    /// # Errors
    ///
    /// Returns error on the first failed page fetch; partial progress is
    /// discarded since a partial catalog would silently drop products.
    #[instrument(skip(self, filters))]
    pub async fn list_products(
        &self,
        filters: &ProductFilters,
    ) -> Result<Vec<SourceProduct>, SourceError> {
        let limit = self.inner.page_size;
        let mut offset: u64 = 0;
        let mut pages_fetched: u32 = 0;
        let mut all = Vec::new();

        loop {
            let mut url = self.endpoint(PRODUCTS_PATH)?;
            {
                let mut pairs = url.query_pairs_mut();
                pairs.append_pair("limit", &limit.to_string());
                pairs.append_pair("offset", &offset.to_string());
                if let Some(category) = &filters.category {
                    pairs.append_pair("category", category);
                }
                if let Some(status) = &filters.status {
                    pairs.append_pair("status", status);
                }
            }

            let body = self.get_json(url).await?;
            let page = ProductPage::from_value(body)?;
            let count = page.products.len() as u64;
            tracing::debug!(offset, count, total = ?page.total, "fetched product page");
            all.extend(page.products);
            offset += count;
            pages_fetched += 1;

            if listing_exhausted(count, limit, offset, page.total, pages_fetched) {
                if pages_fetched >= MAX_LISTING_PAGES {
                    tracing::warn!(pages = pages_fetched, "listing page cap reached, stopping walk");
                }
                break;
            }
        }

        tracing::info!(fetched = all.len(), "product listing complete");
        Ok(all)
    }

    /// Fetch detailed information for a single product.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Status` with code 404 when the product does not
    /// exist at the source.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product_detail(&self, id: &str) -> Result<SourceProduct, SourceError> {
        let url = self.endpoint(&format!("{PRODUCTS_PATH}{id}/"))?;
        let body = self.get_json(url).await?;

        // Some source deployments wrap the detail record in an envelope.
        let record = match body {
            Value::Object(mut map) if map.contains_key("product") => map
                .remove("product")
                .unwrap_or(Value::Null),
            other => other,
        };

        serde_json::from_value(record)
            .map_err(|e| SourceError::Parse(format!("product detail: {e}")))
    }

    /// Fetch inventory records for a set of product identifiers, keyed by id.
    ///
    /// An empty `ids` slice short-circuits to an empty map without a network
    /// call.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body cannot be parsed.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn inventory(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, InventoryRecord>, SourceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut url = self.endpoint(INVENTORY_PATH)?;
        url.query_pairs_mut()
            .append_pair("product_ids", &ids.join(","));

        let body = self.get_json(url).await?;
        let page = InventoryPage::from_value(body)?;

        let mut by_id = HashMap::with_capacity(page.inventory.len());
        for record in page.inventory {
            by_id.insert(record.product_id.clone(), record);
        }
        Ok(by_id)
    }

    /// Build an endpoint URL relative to the configured base.
    fn endpoint(&self, path: &str) -> Result<Url, SourceError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Issue a GET and decode the response.
    async fn get_json(&self, url: Url) -> Result<Value, SourceError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        decode_response(status, &body)
    }
}

impl std::fmt::Debug for SourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("page_size", &self.inner.page_size)
            .finish_non_exhaustive()
    }
}

/// Decide whether the listing walk is done after a page of `count` records.
///
/// The walk stops on an empty or short page, when a reported `total` has
/// been reached, or at the page cap. Pure so the termination conditions are
/// testable without a server.
const fn listing_exhausted(
    count: u64,
    limit: u32,
    offset: u64,
    total: Option<u64>,
    pages_fetched: u32,
) -> bool {
    if count == 0 || count < limit as u64 {
        return true;
    }
    if let Some(total) = total
        && offset >= total
    {
        return true;
    }
    pages_fetched >= MAX_LISTING_PAGES
}

/// Decode a source API response: JSON body on 2xx, status error otherwise.
///
/// Pure so that HTTP-status semantics are testable without a server.
fn decode_response(status: StatusCode, body: &str) -> Result<Value, SourceError> {
    if status.is_success() {
        serde_json::from_str(body).map_err(|e| SourceError::Parse(format!("response body: {e}")))
    } else {
        Err(SourceError::Status {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_response_parses_2xx_body() {
        let value =
            decode_response(StatusCode::OK, r#"{"products": []}"#).expect("decode");
        assert!(value["products"].as_array().expect("array").is_empty());
    }

    #[test]
    fn test_decode_response_404_is_status_error_not_body() {
        let err = decode_response(StatusCode::NOT_FOUND, r#"{"detail": "missing"}"#)
            .expect_err("404");
        match err {
            SourceError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_response_garbage_body_is_parse_error() {
        let err = decode_response(StatusCode::OK, "<html>oops</html>").expect_err("garbage");
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_listing_stops_on_short_page() {
        assert!(listing_exhausted(3, 50, 53, None, 2));
    }

    #[test]
    fn test_listing_stops_on_empty_first_page() {
        assert!(listing_exhausted(0, 50, 0, None, 1));
    }

    #[test]
    fn test_listing_stops_on_exactly_full_final_page_with_total() {
        // 2 pages of 50 against a reported total of 100.
        assert!(listing_exhausted(50, 50, 100, Some(100), 2));
    }

    #[test]
    fn test_listing_continues_past_full_page_without_total() {
        // Bare-array pages report no total; only a short page ends the walk.
        assert!(!listing_exhausted(50, 50, 50, None, 1));
        assert!(!listing_exhausted(50, 50, 100, None, 2));
    }

    #[test]
    fn test_listing_continues_while_total_not_reached() {
        assert!(!listing_exhausted(50, 50, 50, Some(120), 1));
    }

    #[test]
    fn test_listing_page_cap_bounds_a_replaying_source() {
        // Full pages, no total, offset advancing forever: the cap ends it.
        assert!(!listing_exhausted(50, 50, 50, None, 1));
        assert!(listing_exhausted(
            50,
            50,
            u64::from(MAX_LISTING_PAGES) * 50,
            None,
            MAX_LISTING_PAGES
        ));
    }

    #[test]
    fn test_source_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SourceClient>();
    }
}
