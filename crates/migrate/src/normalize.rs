//! Source-to-target schema normalization.
//!
//! Pure functions, no I/O. [`normalize`] maps one raw source record (plus
//! its joined inventory record, when the inventory endpoint returned one)
//! into a schema-valid [`NormalizedProduct`]. [`normalize_batch`] applies it
//! across a catalog: one invalid record never aborts the batch, it is
//! skipped and counted.
//!
//! # Mapping rules
//!
//! - `status`: source-delisted wins (`discontinued`); then missing inventory
//!   data or a false `active` flag or zero availability gives `inactive`;
//!   otherwise `active`.
//! - Inventory precedence: joined [`InventoryRecord`] first, then the
//!   product's own inline counts, then 0/0 with the record flagged
//!   incomplete via the `inactive` status. Counts are never fabricated.
//! - Price: JSON number or numeric string coerced to decimal; unparseable
//!   or negative amounts fail the record.
//! - Attributes: only recognized `weight`/`dimensions` sub-keys survive.
//! - Timestamp: source last-modified when RFC 3339-parseable, else the
//!   caller-supplied `now` (injected for deterministic output).

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;

use catalog_migrate_core::{
    Attributes, Category, CurrencyCode, Inventory, NormalizedProduct, Price, ProductStatus,
    ValidationError,
};

use crate::source::{InventoryRecord, SourceProduct};

/// Reasons a source record fails normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The record carries no product identifier.
    #[error("product has no identifier")]
    MissingId,

    /// The price field is absent or cannot be coerced to a non-negative
    /// decimal.
    #[error("unparseable price: {0}")]
    InvalidPrice(String),

    /// The identifier already appeared earlier in the batch.
    #[error("duplicate productId in batch: {0}")]
    DuplicateId(String),

    /// The finished record violates a target schema invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A record excluded from the batch, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Identifier when the source supplied one.
    pub product_id: Option<String>,
    pub reason: NormalizeError,
}

/// Result of normalizing a batch: the valid subset plus the skip ledger.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub products: Vec<NormalizedProduct>,
    pub skipped: Vec<SkippedRecord>,
}

/// Normalize one source record into the target schema.
///
/// `now` is the timestamp fallback for records without a parseable
/// last-modified value; callers inject it so output is deterministic.
///
/// # Errors
///
/// Returns `NormalizeError` when the record has no identifier, an
/// unparseable or negative price, or fails final schema validation.
pub fn normalize(
    product: &SourceProduct,
    inventory: Option<&InventoryRecord>,
    now: DateTime<Utc>,
) -> Result<NormalizedProduct, NormalizeError> {
    let product_id = product
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(NormalizeError::MissingId)?
        .to_string();

    let amount = parse_price(product.price.as_ref())?;
    let currency = product
        .currency
        .as_deref()
        .and_then(CurrencyCode::parse)
        .unwrap_or_default();

    let (counts, inventory_known) = resolve_inventory(product, inventory);
    let status = derive_status(product, counts, inventory_known);

    let normalized = NormalizedProduct {
        product_id,
        name: product.name.clone().unwrap_or_default(),
        description: product.description.clone().unwrap_or_default(),
        category: product
            .category
            .as_deref()
            .map(Category::from_source)
            .unwrap_or_default(),
        price: Price::new(amount, currency),
        inventory: counts,
        attributes: extract_attributes(product.attributes.as_ref()),
        status,
        last_updated: resolve_timestamp(product.last_updated.as_deref(), now),
    };

    normalized.validate()?;
    Ok(normalized)
}

/// Normalize a full catalog against its inventory join.
///
/// Invalid records and in-batch duplicate identifiers land in
/// [`BatchOutcome::skipped`]; everything returned in
/// [`BatchOutcome::products`] has passed schema validation.
pub fn normalize_batch(
    products: &[SourceProduct],
    inventory: &HashMap<String, InventoryRecord>,
    now: DateTime<Utc>,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    let mut seen: HashSet<String> = HashSet::with_capacity(products.len());

    for product in products {
        let record = product.id.as_deref().and_then(|id| inventory.get(id));
        match normalize(product, record, now) {
            Ok(normalized) => {
                if seen.insert(normalized.product_id.clone()) {
                    outcome.products.push(normalized);
                } else {
                    tracing::warn!(product_id = %normalized.product_id, "duplicate id in batch");
                    outcome.skipped.push(SkippedRecord {
                        product_id: Some(normalized.product_id.clone()),
                        reason: NormalizeError::DuplicateId(normalized.product_id),
                    });
                }
            }
            Err(reason) => {
                tracing::warn!(product_id = ?product.id, %reason, "skipping record");
                outcome.skipped.push(SkippedRecord {
                    product_id: product.id.clone(),
                    reason,
                });
            }
        }
    }

    outcome
}

/// Coerce the source price into a non-negative decimal amount.
fn parse_price(raw: Option<&Value>) -> Result<Decimal, NormalizeError> {
    let value = raw.ok_or_else(|| NormalizeError::InvalidPrice("price missing".to_string()))?;

    let amount = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        other => Err(format!("unsupported price shape: {other}")),
    }
    .map_err(NormalizeError::InvalidPrice)?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(NormalizeError::InvalidPrice(format!(
            "negative amount: {amount}"
        )));
    }
    Ok(amount)
}

/// Parse a decimal, accepting scientific notation for JSON numbers like 1e2.
fn parse_decimal(s: &str) -> Result<Decimal, String> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|e| format!("{s:?}: {e}"))
}

/// Pick inventory counts: joined record, then inline fields, then 0/0.
///
/// The second element reports whether real counts were found; without them
/// the caller must not advertise availability.
fn resolve_inventory(
    product: &SourceProduct,
    record: Option<&InventoryRecord>,
) -> (Inventory, bool) {
    if let Some(record) = record {
        return (clamp_counts(record.available, record.reserved), true);
    }
    match product.available {
        Some(available) => (
            clamp_counts(available, product.reserved.unwrap_or(0)),
            true,
        ),
        None => (Inventory::default(), false),
    }
}

/// Convert raw counts to the schema's non-negative integers, clamping
/// negatives to zero and `reserved` to `available`.
fn clamp_counts(available: i64, reserved: i64) -> Inventory {
    let available = u32::try_from(available.max(0)).unwrap_or(u32::MAX);
    let reserved = u32::try_from(reserved.max(0)).unwrap_or(u32::MAX);
    Inventory::new(available, reserved)
}

/// Derive the target status from source flags and availability.
fn derive_status(product: &SourceProduct, counts: Inventory, inventory_known: bool) -> ProductStatus {
    if product.delisted.unwrap_or(false) {
        return ProductStatus::Discontinued;
    }
    if !inventory_known {
        // Incomplete record: no count data from any endpoint.
        return ProductStatus::Inactive;
    }
    if !product.active.unwrap_or(true) || !counts.in_stock() {
        return ProductStatus::Inactive;
    }
    ProductStatus::Active
}

/// Keep only the attribute sub-keys the target recognizes.
fn extract_attributes(raw: Option<&Value>) -> Option<Attributes> {
    let map = raw?.as_object()?;
    let attributes = Attributes {
        weight: map
            .get("weight")
            .and_then(|v| serde_json::from_value(v.clone()).ok()),
        dimensions: map
            .get("dimensions")
            .and_then(|v| serde_json::from_value(v.clone()).ok()),
    };
    (!attributes.is_empty()).then_some(attributes)
}

/// Use the source's last-modified value when parseable, else `now`.
fn resolve_timestamp(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map_or(now, |dt| dt.with_timezone(&Utc))
}
