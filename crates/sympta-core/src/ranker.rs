//! Result ranking: descending match percentage, stable ties.

use crate::matcher::MatchResult;

/// Sort match results by descending match percentage.
///
/// The sort is stable, so diseases with equal percentages keep the
/// knowledge-base scan order they arrived in. No secondary key exists on
/// purpose; stability is the tie-break.
pub fn rank(mut results: Vec<(String, MatchResult)>) -> Vec<(String, MatchResult)> {
    results.sort_by(|a, b| {
        b.1.match_percent
            .partial_cmp(&a.1.match_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}
