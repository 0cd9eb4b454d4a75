//! Ensembled string similarity.
//!
//! Three edit-distance scores are computed on a 0 to 100 scale and averaged
//! with truncation:
//!
//! - [`ratio`]: indel similarity of the two whole strings,
//!   `100 * 2M / T` where `M` is the longest common subsequence and `T` the
//!   combined length in characters.
//! - [`partial_ratio`]: best [`ratio`] of the shorter string against windows
//!   of the longer one anchored on their matching blocks, so substrings,
//!   prefixes and suffixes score high.
//! - [`token_sort_ratio`]: [`ratio`] after lowercasing, stripping punctuation
//!   and sorting whitespace tokens, so word order does not matter.
//!
//! [`ratio`] and [`partial_ratio`] compare raw text. Only the token-sort
//! component normalizes case and punctuation.

use std::collections::HashMap;

use rapidfuzz::fuzz;
use serde::{Deserialize, Serialize};

/// Window similarity above which [`partial_ratio`] stops searching.
const PARTIAL_EXACT_CUTOFF: f64 = 0.995;

/// The three component scores and their ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub ratio: u8,
    pub partial_ratio: u8,
    pub token_sort_ratio: u8,
    /// `floor((ratio + partial_ratio + token_sort_ratio) / 3)`.
    pub overall: u8,
}

impl ScoreBreakdown {
    pub fn compute(a: &str, b: &str) -> Self {
        let ratio = ratio(a, b);
        let partial_ratio = partial_ratio(a, b);
        let token_sort_ratio = token_sort_ratio(a, b);
        Self {
            ratio,
            partial_ratio,
            token_sort_ratio,
            overall: ensemble(ratio, partial_ratio, token_sort_ratio),
        }
    }
}

/// Similarity between two strings in `0..=100`.
///
/// Symmetric, and 100 for identical inputs (including two empty strings).
pub fn score(a: &str, b: &str) -> u8 {
    ScoreBreakdown::compute(a, b).overall
}

/// Equal-weight average of the three components, truncated.
pub fn ensemble(ratio: u8, partial_ratio: u8, token_sort_ratio: u8) -> u8 {
    let sum = u16::from(ratio) + u16::from(partial_ratio) + u16::from(token_sort_ratio);
    // Each input is at most 100, so the mean fits.
    (sum / 3) as u8
}

/// Indel similarity of the whole strings.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    to_percent(fuzz::ratio(a.chars(), b.chars()))
}

/// Best [`ratio`] of the shorter string against windows of the longer one.
///
/// Each matching block `(i, j, n)` of the shorter string against the longer
/// one anchors a window at `j - i` (at least 0) spanning the length of the
/// shorter string, cut short at the end of the longer string. The terminal
/// block anchors the tail window. For inputs of equal length both directions
/// are searched so the result is symmetric.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let best = if a.len() < b.len() {
        best_window_ratio(&a, &b)
    } else if b.len() < a.len() {
        best_window_ratio(&b, &a)
    } else {
        best_window_ratio(&a, &b).max(best_window_ratio(&b, &a))
    };
    if best > PARTIAL_EXACT_CUTOFF {
        100
    } else {
        to_percent(best)
    }
}

/// [`ratio`] of the token-sorted, processed forms of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Lowercases, replaces non-word characters with spaces and trims.
///
/// Characters in U+0080..=U+00FF are dropped first, mirroring the ASCII
/// folding applied before comparison.
pub fn full_process(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter(|ch| !('\u{80}'..='\u{ff}').contains(ch))
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '_' {
                ch
            } else {
                ' '
            }
        })
        .collect();
    cleaned.to_lowercase().trim().to_string()
}

/// Processes `s`, sorts its whitespace tokens and joins them with one space.
pub fn sorted_tokens(s: &str) -> String {
    let processed = full_process(s);
    let mut tokens: Vec<&str> = processed.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn best_window_ratio(shorter: &[char], longer: &[char]) -> f64 {
    let len = shorter.len();
    let mut best = 0.0_f64;
    for block in matching_blocks(shorter, longer) {
        let start = block.longer_start.saturating_sub(block.shorter_start);
        let window = &longer[start.min(longer.len())..longer.len().min(start + len)];
        let similarity = fuzz::ratio(shorter.iter().copied(), window.iter().copied());
        if similarity > PARTIAL_EXACT_CUTOFF {
            return similarity;
        }
        best = best.max(similarity);
    }
    best
}

/// A run of `len` equal characters at `a[shorter_start..]` and `b[longer_start..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MatchingBlock {
    shorter_start: usize,
    longer_start: usize,
    len: usize,
}

/// Non-overlapping common runs of `a` and `b`, in ascending order, followed by
/// the empty block `(a.len(), b.len(), 0)`.
///
/// The longest common run is taken first (earliest in `a`, then earliest in
/// `b`, on ties) and the regions to its left and right are searched the same
/// way. Adjacent runs on one diagonal are merged.
fn matching_blocks(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let index = CharIndex::new(b);
    let mut found = Vec::new();
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((a_lo, a_hi, b_lo, b_hi)) = queue.pop() {
        let block = longest_match(a, b, &index, (a_lo, a_hi), (b_lo, b_hi));
        if block.len == 0 {
            continue;
        }
        let (i, j, n) = (block.shorter_start, block.longer_start, block.len);
        if a_lo < i && b_lo < j {
            queue.push((a_lo, i, b_lo, j));
        }
        if i + n < a_hi && j + n < b_hi {
            queue.push((i + n, a_hi, j + n, b_hi));
        }
        found.push(block);
    }
    found.sort_unstable_by_key(|block| (block.shorter_start, block.longer_start));

    let mut blocks: Vec<MatchingBlock> = Vec::with_capacity(found.len() + 1);
    for block in found {
        let merged = match blocks.last_mut() {
            Some(last)
                if last.shorter_start + last.len == block.shorter_start
                    && last.longer_start + last.len == block.longer_start =>
            {
                last.len += block.len;
                true
            }
            _ => false,
        };
        if !merged {
            blocks.push(block);
        }
    }
    blocks.push(MatchingBlock {
        shorter_start: a.len(),
        longer_start: b.len(),
        len: 0,
    });
    blocks
}

/// Positions of each character in `b`, ascending. Characters that make up more
/// than one percent of a string of 200 or more characters are left out of the
/// index and only joined onto runs that start elsewhere.
struct CharIndex {
    positions: HashMap<char, Vec<usize>>,
}

impl CharIndex {
    fn new(b: &[char]) -> Self {
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, ch) in b.iter().enumerate() {
            positions.entry(*ch).or_default().push(j);
        }
        if b.len() >= 200 {
            let limit = b.len() / 100 + 1;
            positions.retain(|_, at| at.len() <= limit);
        }
        Self { positions }
    }

    fn positions(&self, ch: char) -> &[usize] {
        self.positions.get(&ch).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Longest common run of `a[a_range]` and `b[b_range]`.
fn longest_match(
    a: &[char],
    b: &[char],
    index: &CharIndex,
    (a_lo, a_hi): (usize, usize),
    (b_lo, b_hi): (usize, usize),
) -> MatchingBlock {
    let (mut best_i, mut best_j, mut best_len) = (a_lo, b_lo, 0);
    // Run length ending at each position of `b`, for the previous row of `a`.
    let mut run_ending: HashMap<usize, usize> = HashMap::new();
    for (i, ch) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        for &j in index.positions(*ch) {
            if j < b_lo {
                continue;
            }
            if j >= b_hi {
                break;
            }
            let k = j
                .checked_sub(1)
                .and_then(|prev| run_ending.get(&prev))
                .copied()
                .unwrap_or(0)
                + 1;
            next.insert(j, k);
            if k > best_len {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_len = k;
            }
        }
        run_ending = next;
    }

    while best_i > a_lo && best_j > b_lo && a[best_i - 1] == b[best_j - 1] {
        best_i -= 1;
        best_j -= 1;
        best_len += 1;
    }
    while best_i + best_len < a_hi
        && best_j + best_len < b_hi
        && a[best_i + best_len] == b[best_j + best_len]
    {
        best_len += 1;
    }
    MatchingBlock {
        shorter_start: best_i,
        longer_start: best_j,
        len: best_len,
    }
}

/// Scales a `0.0..=1.0` similarity to a percentage, rounding half to even.
fn to_percent(similarity: f64) -> u8 {
    (similarity * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(score("John Smith 123 Main St", "John Smith 123 Main St"), 100);
        assert_eq!(score("", ""), 100);
    }

    #[test]
    fn empty_against_text_scores_zero() {
        assert_eq!(ratio("", "abc"), 0);
        assert_eq!(partial_ratio("abc", ""), 0);
        assert_eq!(score("", "abc"), 0);
    }

    #[test]
    fn ratio_uses_common_subsequence() {
        // LCS "abc" of 3, total length 7: 600 / 7 = 85.7
        assert_eq!(ratio("abcd", "abc"), 86);
        assert_eq!(ratio("abc", "xyz"), 0);
    }

    #[test]
    fn ratio_rounds_half_to_even() {
        // LCS 5 over 16 characters is exactly 62.5
        assert_eq!(ratio("abcdefgh", "abcdexyz"), 62);
    }

    #[test]
    fn partial_ratio_finds_substring() {
        assert_eq!(partial_ratio("Main St", "123 Main St Apt 4"), 100);
        assert_eq!(partial_ratio("123 Main St Apt 4", "Main St"), 100);
    }

    #[test]
    fn partial_ratio_uses_truncated_tail_window() {
        // The block "ab" anchors the two-character tail: 400 / 6.
        assert_eq!(partial_ratio("abcd", "xxxxxxab"), 67);
    }

    #[test]
    fn partial_ratio_anchors_windows_on_matching_blocks() {
        // Windows at other offsets would align "e Do 123 Main Street" better,
        // but only offsets where a common run lines up are tried.
        assert_eq!(
            partial_ratio("Jayne Do 123 Main Street", "Maria Garcia 123 Main Street"),
            75
        );
        assert_eq!(
            partial_ratio("Maria Garcia 123 Main Street", "Jayne Do 123 Main Street"),
            75
        );
    }

    #[test]
    fn matching_blocks_end_with_terminal_block() {
        let a: Vec<char> = "abxcd".chars().collect();
        let b: Vec<char> = "abcd".chars().collect();
        let blocks: Vec<(usize, usize, usize)> = matching_blocks(&a, &b)
            .iter()
            .map(|block| (block.shorter_start, block.longer_start, block.len))
            .collect();
        assert_eq!(blocks, vec![(0, 0, 2), (3, 2, 2), (5, 4, 0)]);
    }

    #[test]
    fn token_sort_ignores_word_order_case_and_punctuation() {
        assert_eq!(token_sort_ratio("John Smith", "Smith John"), 100);
        assert_eq!(token_sort_ratio("SMITH, John", "john smith"), 100);
        assert_eq!(token_sort_ratio("alpha beta", "beta alpha"), 100);
    }

    #[test]
    fn ratio_is_case_sensitive() {
        assert!(ratio("JOHN", "john") < 100);
    }

    #[test]
    fn word_swap_scores_high_but_not_perfect() {
        let breakdown = ScoreBreakdown::compute("alpha beta", "beta alpha");
        assert_eq!(breakdown.token_sort_ratio, 100);
        assert!(breakdown.ratio < 100);
        assert!(breakdown.overall > 50);
        assert!(breakdown.overall < 100);
    }

    #[test]
    fn ensemble_truncates() {
        assert_eq!(ensemble(89, 95, 89), 91);
        assert_eq!(ensemble(100, 100, 99), 99);
        assert_eq!(ensemble(0, 0, 0), 0);
    }

    #[test]
    fn spelling_and_abbreviation_variants_score_high() {
        let breakdown =
            ScoreBreakdown::compute("John Smith 123 Main St", "Jon Smith 123 Main Street");
        assert_eq!(breakdown.ratio, 89);
        assert_eq!(breakdown.partial_ratio, 95);
        assert_eq!(breakdown.token_sort_ratio, 89);
        assert_eq!(breakdown.overall, 91);
    }

    #[test]
    fn full_process_normalizes() {
        assert_eq!(full_process("  O'Brien, Pat!  "), "o brien  pat");
        assert_eq!(sorted_tokens("Smith, John"), "john smith");
        assert_eq!(sorted_tokens("!!!"), "");
    }
}
