//! Best-match selection over a candidate set.

use billmatch_model::Record;

use crate::block::Candidate;
use crate::score::score;

/// The winning candidate and its overall score.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub candidate: Candidate<'a>,
    pub score: u8,
}

/// Scores every candidate's `name_address` against the query's.
///
/// Returns one score per candidate, in candidate order. Candidates are not
/// modified.
pub fn score_candidates(candidates: &[Candidate<'_>], query: &Record) -> Vec<u8> {
    candidates
        .iter()
        .map(|candidate| score(&candidate.record.name_address, &query.name_address))
        .collect()
}

/// Picks the candidate with the highest score.
///
/// Ties go to the first candidate in iteration order. Returns `None` for an
/// empty candidate set.
pub fn select<'a>(candidates: &[Candidate<'a>], query: &Record) -> Option<Selection<'a>> {
    let scores = score_candidates(candidates, query);
    let best = scores.iter().copied().max()?;
    candidates
        .iter()
        .zip(scores)
        .find(|(_, score)| *score == best)
        .map(|(candidate, score)| Selection {
            candidate: *candidate,
            score,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::all_candidates;

    fn record(name_address: &str, city: &str) -> Record {
        Record::new("", "", city, "", "", name_address)
    }

    #[test]
    fn picks_highest_score() {
        let database = vec![
            record("Jane Doe 9 Elm Rd", "A"),
            record("John Smith 123 Main St", "B"),
        ];
        let query = record("Jon Smith 123 Main Street", "");
        let selection = select(&all_candidates(&database), &query).unwrap();
        assert_eq!(selection.candidate.row, 1);
        assert_eq!(selection.candidate.record.city, "B");
        assert_eq!(selection.score, 91);
    }

    #[test]
    fn ties_go_to_first_candidate() {
        let database = vec![
            record("John Smith 123 Main St", "First"),
            record("John Smith 123 Main St", "Second"),
        ];
        let query = record("John Smith 123 Main St", "");
        for _ in 0..3 {
            let selection = select(&all_candidates(&database), &query).unwrap();
            assert_eq!(selection.candidate.row, 0);
            assert_eq!(selection.candidate.record.city, "First");
            assert_eq!(selection.score, 100);
        }
    }

    #[test]
    fn empty_candidates_select_nothing() {
        assert!(select(&[], &record("x", "")).is_none());
    }

    #[test]
    fn scores_follow_candidate_order() {
        let database = vec![record("abc", ""), record("xyz", "")];
        let scores = score_candidates(&all_candidates(&database), &record("abc", ""));
        assert_eq!(scores[0], 100);
        assert_eq!(scores.len(), 2);
    }
}
