//! Configuration options for batch matching.

use serde::{Deserialize, Serialize};

/// What to do when a query record has no candidates to compete.
///
/// With token reduction enabled the blocker always keeps the rows sharing the
/// maximum token count (possibly zero), so an empty candidate set only occurs
/// when the database itself is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyCandidatePolicy {
    /// Emit the record with an unmatched outcome and keep going.
    #[default]
    MarkUnmatched,
    /// Abort the whole batch.
    Fail,
}

/// Options controlling batch matching behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Narrow each query's candidates to the rows sharing the most tokens.
    ///
    /// Faster on large databases, but the true best match can be discarded
    /// when token overlap and edit-distance similarity disagree (abbreviations,
    /// misspellings that share no exact token).
    pub use_token_reduction: bool,

    /// Handling of queries with no candidate records.
    pub empty_candidates: EmptyCandidatePolicy,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            use_token_reduction: true,
            empty_candidates: EmptyCandidatePolicy::default(),
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that abort on any query that cannot be matched.
    pub fn strict() -> Self {
        Self {
            empty_candidates: EmptyCandidatePolicy::Fail,
            ..Self::default()
        }
    }

    pub fn with_token_reduction(mut self, enable: bool) -> Self {
        self.use_token_reduction = enable;
        self
    }

    pub fn with_empty_candidates(mut self, policy: EmptyCandidatePolicy) -> Self {
        self.empty_candidates = policy;
        self
    }
}
