//! Target-schema types for the catalog migration.
//!
//! These types mirror the target import API contract exactly; serialization
//! uses the contract's camelCase field names.

pub mod attributes;
pub mod category;
pub mod inventory;
pub mod price;
pub mod product;
pub mod status;

pub use attributes::{Attributes, Dimensions, Weight};
pub use category::Category;
pub use inventory::Inventory;
pub use price::{CurrencyCode, Price};
pub use product::{NormalizedProduct, ValidationError};
pub use status::ProductStatus;
