//! Inventory counts for normalized products.

use serde::{Deserialize, Serialize};

/// Inventory counts in the target import schema.
///
/// Invariant: `reserved <= available`. The normalizer enforces this before
/// submission; [`crate::NormalizedProduct::validate`] rechecks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Inventory {
    /// Units on hand and sellable.
    pub available: u32,
    /// Units on hand but committed to open orders.
    pub reserved: u32,
}

impl Inventory {
    /// Create inventory counts, clamping `reserved` to `available`.
    #[must_use]
    pub const fn new(available: u32, reserved: u32) -> Self {
        Self {
            available,
            reserved: if reserved > available {
                available
            } else {
                reserved
            },
        }
    }

    /// Whether any sellable stock remains.
    #[must_use]
    pub const fn in_stock(self) -> bool {
        self.available > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_reserved() {
        let inv = Inventory::new(5, 9);
        assert_eq!(inv.available, 5);
        assert_eq!(inv.reserved, 5);
    }

    #[test]
    fn test_in_stock() {
        assert!(Inventory::new(1, 0).in_stock());
        assert!(!Inventory::new(0, 0).in_stock());
    }
}
