//! Batch matching engine.

use tracing::{debug, trace, warn};

use billmatch_model::{
    EmptyCandidatePolicy, MatchError, MatchOptions, MatchResult, MatchScores, Record, Result,
};

use crate::block::block;
use crate::score::score;
use crate::select::select;

/// Matches incoming records against a reference database.
///
/// The database is borrowed immutably for the lifetime of the engine and is
/// never reordered, so row positions and tie-breaks are stable across calls.
///
/// # Example
///
/// ```ignore
/// use billmatch_map::MatchEngine;
/// use billmatch_model::MatchOptions;
///
/// let engine = MatchEngine::new(&database, MatchOptions::default());
/// let results = engine.match_batch(&incoming)?;
/// ```
pub struct MatchEngine<'a> {
    database: &'a [Record],
    options: MatchOptions,
}

impl<'a> MatchEngine<'a> {
    pub fn new(database: &'a [Record], options: MatchOptions) -> Self {
        Self { database, options }
    }

    /// Matches one query record.
    ///
    /// `row` is the query's position in its batch and is only used for
    /// diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::EmptyCandidateSet`] when no candidates remain and
    /// the policy is [`EmptyCandidatePolicy::Fail`].
    pub fn match_record(&self, row: usize, query: &Record) -> Result<MatchResult> {
        let candidates = block(self.database, query, self.options.use_token_reduction);
        trace!(row, candidates = candidates.len(), "blocked candidates");

        let Some(selection) = select(&candidates, query) else {
            return match self.options.empty_candidates {
                EmptyCandidatePolicy::Fail => Err(MatchError::EmptyCandidateSet { row }),
                EmptyCandidatePolicy::MarkUnmatched => {
                    warn!(row, "no candidate records, marking unmatched");
                    Ok(MatchResult::unmatched(query.clone()))
                }
            };
        };

        let best = selection.candidate.record;
        let scores = MatchScores {
            overall: selection.score,
            address: score(&query.address, &best.address),
            name: score(&query.name, &best.name),
        };
        trace!(
            row,
            matched_row = selection.candidate.row,
            overall = scores.overall,
            "selected best match"
        );
        Ok(MatchResult::matched(
            query.clone(),
            selection.candidate.row,
            best.clone(),
            scores,
        ))
    }

    /// Matches every record of `batch`, producing one result per record in
    /// input order.
    ///
    /// # Errors
    ///
    /// Fails on the first record that cannot be matched under
    /// [`EmptyCandidatePolicy::Fail`]; no partial results are returned.
    pub fn match_batch(&self, batch: &[Record]) -> Result<Vec<MatchResult>> {
        self.match_rows(batch.iter().enumerate())
    }

    /// Like [`match_batch`](Self::match_batch), for queries that carry their
    /// own row numbers. Errors report those rows.
    pub fn match_rows<'q>(
        &self,
        queries: impl ExactSizeIterator<Item = (usize, &'q Record)>,
    ) -> Result<Vec<MatchResult>> {
        debug!(
            database_rows = self.database.len(),
            batch_rows = queries.len(),
            token_reduction = self.options.use_token_reduction,
            "matching batch"
        );
        queries
            .map(|(row, query)| self.match_record(row, query))
            .collect()
    }
}

/// Matches `batch` against `database` with the given options.
pub fn match_batch(
    database: &[Record],
    batch: &[Record],
    options: &MatchOptions,
) -> Result<Vec<MatchResult>> {
    MatchEngine::new(database, options.clone()).match_batch(batch)
}
