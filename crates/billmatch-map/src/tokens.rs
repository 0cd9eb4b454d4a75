//! Whitespace token overlap used for blocking.
//!
//! The overlap count is a coarse pre-filter, not a similarity score: it only
//! counts exact, case-sensitive tokens two strings have in common.

use std::collections::HashSet;

/// Distinct whitespace-delimited tokens of `s`.
pub fn token_set(s: &str) -> HashSet<&str> {
    s.split_whitespace().collect()
}

/// Number of distinct tokens shared by `a` and `b`.
pub fn overlap(a: &str, b: &str) -> usize {
    let left = token_set(a);
    let right = token_set(b);
    left.intersection(&right).count()
}
