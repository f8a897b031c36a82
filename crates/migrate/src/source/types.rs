//! Raw source-schema types.
//!
//! The source catalog is schema-on-read: field presence and numeric
//! representations vary between the listing and detail endpoints, so every
//! field is optional here and coercion happens in the normalizer. Unknown
//! fields are retained in `extra` for diagnostics but never forwarded.

use serde::Deserialize;
use serde_json::Value;

use super::SourceError;

/// A product as returned by the source listing or detail endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceProduct {
    /// Product identifier. The detail endpoint spells it `id`, older listing
    /// payloads `productId`.
    #[serde(default, alias = "productId", alias = "product_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Price as the source sends it: a JSON number or a numeric string.
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Source activity flag.
    #[serde(default)]
    pub active: Option<bool>,
    /// Source delisting flag.
    #[serde(default, alias = "discontinued")]
    pub delisted: Option<bool>,
    /// Inline availability, present on some listing payloads.
    #[serde(default)]
    pub available: Option<i64>,
    #[serde(default)]
    pub reserved: Option<i64>,
    /// Free-form attribute map; only recognized sub-keys survive
    /// normalization.
    #[serde(default)]
    pub attributes: Option<Value>,
    /// Last modification timestamp, RFC 3339 when parseable.
    #[serde(
        default,
        alias = "lastUpdated",
        alias = "last_modified",
        alias = "updated_at"
    )]
    pub last_updated: Option<String>,
    /// Anything else the source sends.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl SourceProduct {
    /// Merge a detail-endpoint record into a listing record.
    ///
    /// Detail fields win when present; listing fields fill the gaps. `extra`
    /// keys from the detail record overlay the listing's.
    #[must_use]
    pub fn merged_with(self, detail: Self) -> Self {
        let mut extra = self.extra;
        extra.extend(detail.extra);
        Self {
            id: detail.id.or(self.id),
            name: detail.name.or(self.name),
            description: detail.description.or(self.description),
            category: detail.category.or(self.category),
            price: detail.price.or(self.price),
            currency: detail.currency.or(self.currency),
            active: detail.active.or(self.active),
            delisted: detail.delisted.or(self.delisted),
            available: detail.available.or(self.available),
            reserved: detail.reserved.or(self.reserved),
            attributes: detail.attributes.or(self.attributes),
            last_updated: detail.last_updated.or(self.last_updated),
            extra,
        }
    }
}

/// An inventory record from the inventory-status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryRecord {
    #[serde(alias = "productId", alias = "id")]
    pub product_id: String,
    #[serde(default)]
    pub available: i64,
    #[serde(default)]
    pub reserved: i64,
}

/// One page of the product listing.
///
/// The source emits either an envelope (`{"products": [...], "total": n}`)
/// or a bare array; both shapes are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<SourceProduct>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl ProductPage {
    /// Parse a listing response body of either accepted shape.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Parse` when the value is neither an array nor a
    /// product envelope.
    pub fn from_value(value: Value) -> Result<Self, SourceError> {
        match value {
            Value::Array(_) => {
                let products = serde_json::from_value(value)
                    .map_err(|e| SourceError::Parse(format!("product list: {e}")))?;
                Ok(Self {
                    products,
                    total: None,
                })
            }
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| SourceError::Parse(format!("product page: {e}"))),
            other => Err(SourceError::Parse(format!(
                "expected array or object, got {other}"
            ))),
        }
    }
}

/// The inventory-status response body.
///
/// Accepts an envelope (`{"inventory": [...]}`) or a bare array.
#[derive(Debug, Default, Deserialize)]
pub struct InventoryPage {
    #[serde(default)]
    pub inventory: Vec<InventoryRecord>,
}

impl InventoryPage {
    /// Parse an inventory response body of either accepted shape.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Parse` when the value is neither an array nor an
    /// inventory envelope.
    pub fn from_value(value: Value) -> Result<Self, SourceError> {
        match value {
            Value::Array(_) => {
                let inventory = serde_json::from_value(value)
                    .map_err(|e| SourceError::Parse(format!("inventory list: {e}")))?;
                Ok(Self { inventory })
            }
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| SourceError::Parse(format!("inventory page: {e}"))),
            other => Err(SourceError::Parse(format!(
                "expected array or object, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_product_tolerates_sparse_payloads() {
        let product: SourceProduct =
            serde_json::from_value(json!({"id": "XX-0001"})).expect("deserialize");
        assert_eq!(product.id.as_deref(), Some("XX-0001"));
        assert!(product.name.is_none());
        assert!(product.price.is_none());
    }

    #[test]
    fn test_source_product_id_aliases() {
        let product: SourceProduct =
            serde_json::from_value(json!({"productId": "XX-0002"})).expect("deserialize");
        assert_eq!(product.id.as_deref(), Some("XX-0002"));
    }

    #[test]
    fn test_unknown_fields_land_in_extra() {
        let product: SourceProduct =
            serde_json::from_value(json!({"id": "XX-0003", "warehouse": "east"}))
                .expect("deserialize");
        assert_eq!(product.extra["warehouse"], "east");
    }

    #[test]
    fn test_merged_with_prefers_detail_fields() {
        let listing: SourceProduct =
            serde_json::from_value(json!({"id": "XX-0004", "name": "Listing Name"}))
                .expect("deserialize");
        let detail: SourceProduct = serde_json::from_value(
            json!({"id": "XX-0004", "name": "Detail Name", "description": "Full text"}),
        )
        .expect("deserialize");

        let merged = listing.merged_with(detail);
        assert_eq!(merged.name.as_deref(), Some("Detail Name"));
        assert_eq!(merged.description.as_deref(), Some("Full text"));
    }

    #[test]
    fn test_merged_with_keeps_listing_fields_absent_from_detail() {
        let listing: SourceProduct =
            serde_json::from_value(json!({"id": "XX-0005", "available": 7}))
                .expect("deserialize");
        let detail: SourceProduct =
            serde_json::from_value(json!({"id": "XX-0005"})).expect("deserialize");

        let merged = listing.merged_with(detail);
        assert_eq!(merged.available, Some(7));
    }

    #[test]
    fn test_product_page_accepts_envelope() {
        let page = ProductPage::from_value(json!({
            "products": [{"id": "XX-0006"}],
            "total": 42
        }))
        .expect("page");
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.total, Some(42));
    }

    #[test]
    fn test_product_page_accepts_bare_array() {
        let page = ProductPage::from_value(json!([{"id": "XX-0007"}])).expect("page");
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.total, None);
    }

    #[test]
    fn test_product_page_rejects_scalar() {
        let err = ProductPage::from_value(json!(3)).expect_err("scalar");
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_inventory_page_accepts_both_shapes() {
        let enveloped = InventoryPage::from_value(json!({
            "inventory": [{"product_id": "XX-0008", "available": 3, "reserved": 1}]
        }))
        .expect("envelope");
        assert_eq!(enveloped.inventory.len(), 1);

        let bare = InventoryPage::from_value(
            json!([{"productId": "XX-0009", "available": 5, "reserved": 0}]),
        )
        .expect("bare");
        assert_eq!(bare.inventory[0].product_id, "XX-0009");
    }
}
