//! Answer matching for spelling dictation.
//!
//! Correctness is exact equality after [`normalize`]; the similarity
//! score is only feedback for the learner. Two scoring strategies exist:
//! a plain Levenshtein ratio and a phonetically weighted variant that
//! charges less for vowel-for-vowel (and consonant-for-consonant)
//! substitutions, so near-miss spellings score above arbitrary errors
//! of the same edit count.

use crate::normalize::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the similarity score is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Plain normalized Levenshtein ratio.
    Ratio,
    /// Edit distance with phonetic-class substitution weights.
    Phonetic,
}

impl Default for MatchStrategy {
    fn default() -> Self {
        Self::Phonetic
    }
}

/// Result of comparing a typed answer to the target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Exact match after normalization.
    pub is_correct: bool,
    /// Similarity score between 0.0 and 1.0.
    pub similarity: f64,
    /// Normalized typed answer.
    pub typed: String,
    /// Normalized target.
    pub target: String,
}

impl fmt::Display for MatchResult {
    /// One-line audit record: `✓ | target | typed | 97.50%`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_correct { '✓' } else { '✗' };
        write!(
            f,
            "{} | {} | {} | {:.2}%",
            mark,
            self.target,
            self.typed,
            self.similarity * 100.0
        )
    }
}

/// Compare a typed answer to the target.
///
/// Both sides are normalized first; the similarity is computed even for
/// exact matches so the audit line always carries a score.
pub fn compare_answers(typed: &str, target: &str, strategy: MatchStrategy) -> MatchResult {
    let typed = normalize(typed);
    let target = normalize(target);

    MatchResult {
        is_correct: typed == target,
        similarity: similarity(&typed, &target, strategy),
        typed,
        target,
    }
}

/// Similarity between two already-normalized strings, in [0,1].
///
/// 1.0 iff the strings are equal (two empty strings count as a trivial
/// match); decreases monotonically with additional edit operations.
pub fn similarity(a: &str, b: &str, strategy: MatchStrategy) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let max_len = a_chars.len().max(b_chars.len());
    if max_len == 0 {
        return 1.0;
    }

    let cost = match strategy {
        MatchStrategy::Ratio => levenshtein_distance(a, b) as f64,
        MatchStrategy::Phonetic => weighted_edit_cost(&a_chars, &b_chars),
    };

    1.0 - cost / max_len as f64
}

/// Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix.
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };

            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Minimal total edit cost with phonetic substitution weights.
///
/// Insertions and deletions cost 1.0; substitutions cost
/// [`replace_cost`] of the two characters involved.
fn weighted_edit_cost(a: &[char], b: &[char]) -> f64 {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n as f64;
    }
    if n == 0 {
        return m as f64;
    }

    let mut prev: Vec<f64> = (0..=n).map(|j| j as f64).collect();
    let mut curr = vec![0.0; n + 1];

    for i in 1..=m {
        curr[0] = i as f64;

        for j in 1..=n {
            let sub = if a[i - 1] == b[j - 1] {
                0.0
            } else {
                replace_cost(a[i - 1], b[j - 1])
            };

            curr[j] = (prev[j] + 1.0)
                .min(curr[j - 1] + 1.0)
                .min(prev[j - 1] + sub);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Substitution cost by phonetic class: vowel↔vowel 0.5,
/// consonant↔consonant 0.8, anything else 1.0.
fn replace_cost(a: char, b: char) -> f64 {
    if is_vowel(a) && is_vowel(b) {
        0.5
    } else if is_consonant(a) && is_consonant(b) {
        0.8
    } else {
        1.0
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_lowercase() && !is_vowel(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn identical_strings_score_one() {
        for strategy in [MatchStrategy::Ratio, MatchStrategy::Phonetic] {
            assert_close(similarity("apple", "apple", strategy), 1.0);
            assert_close(similarity("", "", strategy), 1.0);
        }
    }

    #[test]
    fn ratio_is_symmetric() {
        let a = similarity("kitten", "sitting", MatchStrategy::Ratio);
        let b = similarity("sitting", "kitten", MatchStrategy::Ratio);
        assert_close(a, b);
    }

    #[test]
    fn vowel_substitution_scores_above_consonant_substitution() {
        // bat -> bet: one vowel swap, cost 0.5 over max length 3.
        assert_close(
            similarity("bat", "bet", MatchStrategy::Phonetic),
            1.0 - 0.5 / 3.0,
        );
        // bat -> cat: one consonant swap, cost 0.8.
        assert_close(
            similarity("bat", "cat", MatchStrategy::Phonetic),
            1.0 - 0.8 / 3.0,
        );
    }

    #[test]
    fn insertions_always_cost_one() {
        assert_close(
            similarity("bat", "bats", MatchStrategy::Phonetic),
            1.0 - 1.0 / 4.0,
        );
    }

    #[test]
    fn exact_match_ignores_case_and_outer_spaces() {
        let result = compare_answers("Apple", "apple ", MatchStrategy::Phonetic);
        assert!(result.is_correct);
        assert_close(result.similarity, 1.0);
    }

    #[test]
    fn near_miss_is_incorrect_but_scored() {
        let result = compare_answers("bet", "bat", MatchStrategy::Phonetic);
        assert!(!result.is_correct);
        assert_close(result.similarity, 1.0 - 0.5 / 3.0);
    }

    #[test]
    fn empty_answer_is_defined() {
        let result = compare_answers("", "apple", MatchStrategy::Phonetic);
        assert!(!result.is_correct);
        assert_close(result.similarity, 0.0);
    }

    #[test]
    fn audit_line_format() {
        let result = compare_answers("Apple", "apple ", MatchStrategy::Phonetic);
        assert_eq!(result.to_string(), "✓ | apple | apple | 100.00%");

        let result = compare_answers("bet", "bat", MatchStrategy::Phonetic);
        assert_eq!(result.to_string(), "✗ | bat | bet | 83.33%");
    }
}
