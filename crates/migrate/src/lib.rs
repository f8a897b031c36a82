//! Catalog migration pipeline library.
//!
//! Pulls product and inventory records from a source catalog API, normalizes
//! them into the target import schema, and submits the batch to the target
//! import API. Execution is strictly sequential: fetch, normalize, submit.
//!
//! # Modules
//!
//! - [`config`] - Environment-based configuration (base URLs, bearer token)
//! - [`source`] - Read-only client for the source catalog API
//! - [`normalize`] - Pure source-to-target schema mapping
//! - [`target`] - Write-only client for the target import API
//! - [`pipeline`] - One-shot orchestration of the full run

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod source;
pub mod target;

pub use config::{ConfigError, MigrateConfig};
pub use error::MigrateError;
pub use normalize::{BatchOutcome, NormalizeError, SkippedRecord, normalize, normalize_batch};
pub use pipeline::{MigrationReport, run_migration};
pub use source::{ProductFilters, SourceClient, SourceError};
pub use target::{SubmissionResult, TargetClient, TargetError};
