//! Top-level error type for a migration run.

use thiserror::Error;

use crate::config::ConfigError;
use crate::source::SourceError;
use crate::target::TargetError;

/// Failures that abort a migration run.
///
/// Per-record problems (normalization skips, detail-fetch failures) never
/// surface here; they are carried in the
/// [`MigrationReport`](crate::pipeline::MigrationReport). Variants stay
/// distinguishable so callers can assert on the failure class.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The product listing could not be fetched at all.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// The final submission failed at the transport level.
    #[error("target error: {0}")]
    Target(#[from] TargetError),
}
