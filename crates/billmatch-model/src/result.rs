//! Match results produced by the batch matcher.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Scores attached to a matched record, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScores {
    /// Ensembled score between the two `name_address` fields.
    pub overall: u8,
    /// Ensembled score between the two addresses.
    pub address: u8,
    /// Ensembled score between the two names.
    pub name: u8,
}

/// Outcome of matching a single incoming record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// The best database record for this query.
    Matched {
        /// Position of the record in the database it was matched against.
        row: usize,
        record: Record,
        scores: MatchScores,
    },
    /// No candidate was available.
    Unmatched,
}

/// One output row: an incoming record paired with its best database record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub bill: Record,
    pub outcome: MatchOutcome,
}

impl MatchResult {
    pub fn matched(bill: Record, row: usize, record: Record, scores: MatchScores) -> Self {
        Self {
            bill,
            outcome: MatchOutcome::Matched {
                row,
                record,
                scores,
            },
        }
    }

    pub fn unmatched(bill: Record) -> Self {
        Self {
            bill,
            outcome: MatchOutcome::Unmatched,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Matched { .. })
    }

    /// Returns the matched database record, if any.
    pub fn matched_record(&self) -> Option<&Record> {
        match &self.outcome {
            MatchOutcome::Matched { record, .. } => Some(record),
            MatchOutcome::Unmatched => None,
        }
    }

    /// Returns the scores of the match, if any.
    pub fn scores(&self) -> Option<MatchScores> {
        match &self.outcome {
            MatchOutcome::Matched { scores, .. } => Some(*scores),
            MatchOutcome::Unmatched => None,
        }
    }

    pub fn overall_score(&self) -> Option<u8> {
        self.scores().map(|scores| scores.overall)
    }
}

/// Aggregate counts over a set of match results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    /// Mean overall score over matched rows.
    pub mean_overall: Option<f64>,
    pub min_overall: Option<u8>,
    pub max_overall: Option<u8>,
}

impl BatchSummary {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let overall: Vec<u8> = results
            .iter()
            .filter_map(MatchResult::overall_score)
            .collect();
        let mean_overall = if overall.is_empty() {
            None
        } else {
            let sum: u64 = overall.iter().map(|&score| u64::from(score)).sum();
            Some(sum as f64 / overall.len() as f64)
        };
        Self {
            total: results.len(),
            matched: overall.len(),
            unmatched: results.len() - overall.len(),
            mean_overall,
            min_overall: overall.iter().copied().min(),
            max_overall: overall.iter().copied().max(),
        }
    }
}
