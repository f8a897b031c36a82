//! Status enum for normalized products.

use serde::{Deserialize, Serialize};

/// Product status in the target import schema.
///
/// Derived deterministically from the source's activity and availability
/// flags during normalization; the target accepts no other values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Listed and purchasable (source-active with stock on hand).
    Active,
    /// Listed but not purchasable (out of stock, source-inactive, or
    /// inventory data missing).
    #[default]
    Inactive,
    /// Delisted at the source; kept for historical imports.
    Discontinued,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Discontinued => write!(f, "discontinued"),
        }
    }
}
