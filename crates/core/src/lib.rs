//! Catalog Migrate Core - Shared types library.
//!
//! This crate provides the target import schema used across the migration
//! components:
//! - `migrate` - Fetch/normalize/submit pipeline library
//! - `cli` - Command-line entry point
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP
//! clients, no configuration. This keeps it lightweight and allows it to be
//! used anywhere, including in pure normalization code and tests.
//!
//! # Modules
//!
//! - [`types`] - Target-schema types: prices, inventory, statuses, products

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
