//! Optional physical attributes carried through to the target schema.
//!
//! Only the sub-keys the target recognizes (`weight`, `dimensions`) survive
//! normalization; arbitrary source attribute shapes are dropped.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Recognized product attributes.
///
/// Serialized with both fields omitted when absent, so a product with no
/// attribute data carries no `attributes` noise in the import payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Attributes {
    /// Product weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
    /// Packaged dimensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
}

impl Attributes {
    /// Whether no recognized attribute data is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.weight.is_none() && self.dimensions.is_none()
    }
}

/// Weight with unit (e.g., `{"value": 350, "unit": "g"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weight {
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub unit: String,
}

/// Packaged dimensions with a shared unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(with = "rust_decimal::serde::float")]
    pub length: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub width: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub height: Decimal,
    pub unit: String,
}
