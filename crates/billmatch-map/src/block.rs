//! Candidate blocking by token overlap.
//!
//! With blocking enabled, only the database rows that share the largest number
//! of exact tokens with the query go on to full scoring. This trades recall for
//! speed: the best edit-distance match can be dropped when it shares fewer
//! tokens than some other row, e.g. because of abbreviations ("St" vs
//! "Street") or misspellings that break every shared token.

use billmatch_model::Record;

use crate::tokens::overlap;

/// A database record under consideration for a query.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Position of the record in the database slice.
    pub row: usize,
    pub record: &'a Record,
}

/// Every database row, in database order.
pub fn all_candidates(database: &[Record]) -> Vec<Candidate<'_>> {
    database
        .iter()
        .enumerate()
        .map(|(row, record)| Candidate { row, record })
        .collect()
}

/// Token overlap of each database row's `name_address` with the query's.
///
/// Returns one count per database row, in database order.
pub fn overlap_counts(database: &[Record], query: &Record) -> Vec<usize> {
    database
        .iter()
        .map(|record| overlap(&record.name_address, &query.name_address))
        .collect()
}

/// Candidate set for `query`.
///
/// Disabled blocking returns the whole database. Enabled blocking returns
/// exactly the rows achieving the maximum overlap count, which may be zero,
/// so the result is only empty when the database is.
pub fn block<'a>(database: &'a [Record], query: &Record, enabled: bool) -> Vec<Candidate<'a>> {
    let candidates = all_candidates(database);
    if !enabled {
        return candidates;
    }
    let counts = overlap_counts(database, query);
    let Some(most_common) = counts.iter().copied().max() else {
        return candidates;
    };
    candidates
        .into_iter()
        .zip(counts)
        .filter(|(_, count)| *count == most_common)
        .map(|(candidate, _)| candidate)
        .collect()
}
