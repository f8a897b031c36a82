//! One-shot orchestration: fetch, normalize, submit.
//!
//! Execution is strictly sequential. Individual detail or inventory fetch
//! failures are logged and degrade the run (the affected records fall back
//! to listing data or incomplete-inventory handling); only a failed listing
//! or a transport-level submission failure aborts it.

use std::collections::HashMap;

use chrono::Utc;
use tracing::instrument;

use crate::config::MigrateConfig;
use crate::error::MigrateError;
use crate::normalize::{SkippedRecord, normalize_batch};
use crate::source::{ProductFilters, SourceClient, SourceProduct};
use crate::target::{SubmissionResult, TargetClient};

/// Summary of one migration run.
#[derive(Debug)]
pub struct MigrationReport {
    /// Products returned by the source listing.
    pub fetched: usize,
    /// Records that passed normalization and were submitted.
    pub normalized: usize,
    /// Records excluded during normalization, with reasons.
    pub skipped: Vec<SkippedRecord>,
    /// Detail fetches that failed and fell back to listing data.
    pub detail_failures: usize,
    /// The import API's response.
    pub submission: SubmissionResult,
}

impl MigrationReport {
    /// Whether the run completed without skips, fallbacks, or rejection.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.detail_failures == 0 && !self.submission.is_rejected()
    }
}

/// Run the full migration once: list, enrich, join inventory, normalize,
/// submit.
///
/// # Errors
///
/// Returns `MigrateError` when the product listing cannot be fetched or the
/// submission fails at the transport level. A 400 rejection from the import
/// API is *not* an error; it is surfaced in the report's submission body.
#[instrument(skip(config))]
pub async fn run_migration(config: &MigrateConfig) -> Result<MigrationReport, MigrateError> {
    let source = SourceClient::new(config)?;
    let target = TargetClient::new(config)?;

    let listed = source.list_products(&ProductFilters::default()).await?;
    let fetched = listed.len();

    let (enriched, detail_failures) = enrich_with_details(&source, listed).await;

    let ids: Vec<String> = enriched.iter().filter_map(|p| p.id.clone()).collect();
    let inventory = match source.inventory(&ids).await {
        Ok(map) => map,
        Err(err) => {
            // Without the join every record is treated as inventory-incomplete.
            tracing::warn!(%err, "inventory fetch failed, continuing without counts");
            HashMap::new()
        }
    };

    let outcome = normalize_batch(&enriched, &inventory, Utc::now());
    tracing::info!(
        fetched,
        normalized = outcome.products.len(),
        skipped = outcome.skipped.len(),
        "normalization complete"
    );

    let submission = target.submit_batch(&outcome.products).await?;

    Ok(MigrationReport {
        fetched,
        normalized: outcome.products.len(),
        skipped: outcome.skipped,
        detail_failures,
        submission,
    })
}

/// Fill in listing gaps from the detail endpoint, one product at a time.
///
/// A failed detail fetch keeps the listing record as-is and is counted, it
/// never aborts the run.
async fn enrich_with_details(
    source: &SourceClient,
    listed: Vec<SourceProduct>,
) -> (Vec<SourceProduct>, usize) {
    let mut enriched = Vec::with_capacity(listed.len());
    let mut failures = 0;

    for product in listed {
        let Some(id) = product.id.clone() else {
            enriched.push(product);
            continue;
        };
        match source.product_detail(&id).await {
            Ok(detail) => enriched.push(product.merged_with(detail)),
            Err(err) => {
                tracing::warn!(product_id = %id, %err, "detail fetch failed, using listing data");
                failures += 1;
                enriched.push(product);
            }
        }
    }

    (enriched, failures)
}
