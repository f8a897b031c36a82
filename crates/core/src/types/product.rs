//! The normalized product record submitted to the target import API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Attributes, Category, Inventory, Price, ProductStatus};

/// A product record in the target import schema.
///
/// Field names on the wire follow the target contract (camelCase). Every
/// record must pass [`NormalizedProduct::validate`] before submission; the
/// target client performs no correction of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProduct {
    /// Unique product identifier within a submission batch.
    pub product_id: String,
    /// Display name.
    pub name: String,
    /// Plain-text description.
    pub description: String,
    /// Target category vocabulary.
    pub category: Category,
    /// Price with currency.
    pub price: Price,
    /// Inventory counts.
    pub inventory: Inventory,
    /// Recognized physical attributes; omitted when the source had none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// Derived product status.
    pub status: ProductStatus,
    /// Last modification time, UTC.
    pub last_updated: DateTime<Utc>,
}

/// Schema violations caught by [`NormalizedProduct::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `productId` is empty.
    #[error("productId must be a non-empty string")]
    EmptyProductId,

    /// Price amount is below zero.
    #[error("price amount must be non-negative, got {0}")]
    NegativePrice(String),

    /// Reserved count exceeds available count.
    #[error("reserved ({reserved}) exceeds available ({available})")]
    ReservedExceedsAvailable { reserved: u32, available: u32 },
}

impl NormalizedProduct {
    /// Check the schema invariants the target import API enforces.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: empty `productId`, negative
    /// price amount, or `reserved > available`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.product_id.trim().is_empty() {
            return Err(ValidationError::EmptyProductId);
        }
        if self.price.amount.is_sign_negative() && !self.price.amount.is_zero() {
            return Err(ValidationError::NegativePrice(self.price.amount.to_string()));
        }
        if self.inventory.reserved > self.inventory.available {
            return Err(ValidationError::ReservedExceedsAvailable {
                reserved: self.inventory.reserved,
                available: self.inventory.available,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CurrencyCode;
    use rust_decimal::Decimal;

    fn sample() -> NormalizedProduct {
        NormalizedProduct {
            product_id: "XX-0000".to_string(),
            name: "Widget".to_string(),
            description: String::new(),
            category: Category::Electronics,
            price: Price::new(Decimal::new(9999, 2), CurrencyCode::USD),
            inventory: Inventory::new(10, 2),
            attributes: None,
            status: ProductStatus::Active,
            last_updated: "2024-10-12T08:30:15Z"
                .parse()
                .expect("timestamp"),
        }
    }

    #[test]
    fn test_valid_product_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_empty_product_id_rejected() {
        let mut product = sample();
        product.product_id = "  ".to_string();
        assert_eq!(product.validate(), Err(ValidationError::EmptyProductId));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut product = sample();
        product.price.amount = Decimal::new(-1, 2);
        assert!(matches!(
            product.validate(),
            Err(ValidationError::NegativePrice(_))
        ));
    }

    #[test]
    fn test_reserved_over_available_rejected() {
        let mut product = sample();
        // Bypass the clamping constructor to exercise validate directly.
        product.inventory = Inventory {
            available: 1,
            reserved: 3,
        };
        assert_eq!(
            product.validate(),
            Err(ValidationError::ReservedExceedsAvailable {
                reserved: 3,
                available: 1
            })
        );
    }

    #[test]
    fn test_serializes_with_contract_field_names() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(json["productId"], "XX-0000");
        assert_eq!(json["price"]["amount"], serde_json::json!(99.99));
        assert_eq!(json["price"]["currency"], "USD");
        assert_eq!(json["inventory"]["available"], 10);
        assert_eq!(json["status"], "active");
        assert_eq!(json["lastUpdated"], "2024-10-12T08:30:15Z");
        // Absent attributes are omitted entirely, not serialized as null.
        assert!(json.get("attributes").is_none());
    }
}
