//! Table-level entry point.

use polars::prelude::DataFrame;
use tracing::info;

use billmatch_model::{BatchSummary, MatchOptions, Result, records_from_frame, results_to_frame};

use crate::engine::match_batch;

/// Matches every row of `batch` against `database` and returns the 13-column
/// result table, one row per batch row in input order.
///
/// Neither input table is modified.
///
/// # Errors
///
/// Fails if either table lacks a required column or has a non-text required
/// column, or if a row has no candidates under a failing policy.
pub fn match_frames(
    database: &DataFrame,
    batch: &DataFrame,
    options: &MatchOptions,
) -> Result<DataFrame> {
    let database = records_from_frame(database)?;
    let batch = records_from_frame(batch)?;
    let results = match_batch(&database, &batch, options)?;
    let summary = BatchSummary::from_results(&results);
    info!(
        total = summary.total,
        matched = summary.matched,
        unmatched = summary.unmatched,
        "batch matched"
    );
    results_to_frame(&results)
}
