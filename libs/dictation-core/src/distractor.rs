//! Distractor selection for meaning questions.
//!
//! Given a target gloss and the deduplicated pool of all other known
//! glosses, pick plausible-but-wrong options: lexically distinct after
//! normalization, and (when a [`SemanticScorer`] is supplied) not so
//! close in meaning to the target that the question becomes ambiguous.

use crate::cache::Memo;
use crate::normalize::normalize;
use crate::types::QuizOutcome;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Displayed label of the "answer not present" slot.
pub const NONE_LABEL: &str = "以上都不对";

/// Semantic similarity collaborator, `similarity(a, b)` in [0,1].
///
/// The selector works without one (pure random sampling); supplying one
/// enables the near-synonym rejection filter.
pub trait SemanticScorer {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Dice coefficient over the character sets of two glosses.
///
/// Shared hanzi are a strong signal of related meaning, which makes
/// this a serviceable stand-in for an embedding comparison.
#[derive(Debug, Default)]
pub struct CharOverlapScorer;

impl SemanticScorer for CharOverlapScorer {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let set_a: HashSet<char> = a.chars().collect();
        let set_b: HashSet<char> = b.chars().collect();

        if set_a.is_empty() && set_b.is_empty() {
            return 1.0;
        }

        let shared = set_a.intersection(&set_b).count();
        2.0 * shared as f64 / (set_a.len() + set_b.len()) as f64
    }
}

/// Memoizing wrapper around any scorer.
///
/// Scores are symmetric, so the cache key is the ordered pair.
pub struct CachedScorer<S> {
    inner: S,
    cache: Memo<(String, String), f64>,
}

impl<S: SemanticScorer> CachedScorer<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Memo::new(),
        }
    }
}

impl<S: SemanticScorer> SemanticScorer for CachedScorer<S> {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let key = if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        };
        self.cache
            .get_or_insert_with(key, || self.inner.similarity(a, b))
    }
}

/// Tunables for question construction.
#[derive(Debug, Clone)]
pub struct DistractorConfig {
    /// Number of real option slots (the "not present" slot is extra).
    pub options: usize,
    /// Sampling attempts before giving up on filling a slot.
    pub max_attempts: usize,
    /// Candidates scoring above this against the target are rejected.
    pub semantic_threshold: f64,
    /// Probability that the target is dropped and the "not present"
    /// slot becomes the correct answer. Zero disables the extra slot.
    pub none_probability: f64,
}

impl Default for DistractorConfig {
    fn default() -> Self {
        Self {
            options: 4,
            max_attempts: 10_000,
            semantic_threshold: 0.9,
            none_probability: 0.0,
        }
    }
}

/// One rendered meaning question: shuffled options plus the correct slot.
///
/// Built fresh per question and discarded once it resolves.
#[derive(Debug, Clone)]
pub struct MeaningQuestion {
    options: Vec<String>,
    /// Index of the target gloss, `None` when it was dropped.
    correct: Option<usize>,
    /// Index of the "not present" slot, when one exists.
    none_slot: Option<usize>,
}

impl MeaningQuestion {
    /// Build a question for `target` from the meaning pool.
    ///
    /// The pool is an immutable snapshot shared across the session;
    /// sampling is rejection-based with a bounded attempt budget, so a
    /// nearly-exhausted pool degrades to empty placeholder slots rather
    /// than looping forever. All randomness comes from `rng`.
    pub fn build<R: Rng + ?Sized>(
        target: &str,
        pool: &[String],
        config: &DistractorConfig,
        scorer: Option<&dyn SemanticScorer>,
        rng: &mut R,
    ) -> Self {
        let with_none = config.none_probability > 0.0;
        let drop_target = with_none && rng.gen_bool(config.none_probability);

        let mut options: Vec<String> = Vec::with_capacity(config.options + 1);
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(normalize(target));

        if !drop_target {
            options.push(target.to_string());
        }

        let mut attempts = 0;
        while options.len() < config.options && attempts < config.max_attempts {
            attempts += 1;
            if pool.is_empty() {
                break;
            }

            let candidate = &pool[rng.gen_range(0..pool.len())];
            if seen.contains(&normalize(candidate)) {
                continue;
            }
            if let Some(scorer) = scorer {
                if scorer.similarity(candidate, target) > config.semantic_threshold {
                    continue;
                }
            }

            seen.insert(normalize(candidate));
            options.push(candidate.clone());
        }

        // Pool exhausted: pad so the layout stays stable.
        while options.len() < config.options {
            options.push(String::new());
        }

        options.shuffle(rng);
        let correct = if drop_target {
            None
        } else {
            options.iter().position(|o| o == target)
        };

        let none_slot = if with_none {
            options.push(NONE_LABEL.to_string());
            Some(options.len() - 1)
        } else {
            None
        };

        Self {
            options,
            correct,
            none_slot,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn correct_index(&self) -> Option<usize> {
        self.correct
    }

    pub fn has_none_option(&self) -> bool {
        self.none_slot.is_some()
    }

    /// Grade a validated choice index.
    pub fn grade(&self, choice: usize) -> QuizOutcome {
        if self.none_slot == Some(choice) {
            return QuizOutcome::NotExist;
        }
        if self.correct == Some(choice) {
            QuizOutcome::Right
        } else {
            QuizOutcome::Wrong
        }
    }
}

/// Parse a typed option choice against `option_count` slots.
///
/// Accepts `1`-based digits and letters from `A` (either case); returns
/// the zero-based index, or `None` for anything out of range or
/// unparseable.
pub fn parse_choice(input: &str, option_count: usize) -> Option<usize> {
    let input = input.trim_matches([' ', '\u{3000}']);

    if input.chars().all(|c| c.is_ascii_digit()) && !input.is_empty() {
        let n: usize = input.parse().ok()?;
        if (1..=option_count).contains(&n) {
            return Some(n - 1);
        }
        return None;
    }

    let mut chars = input.chars();
    let letter = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let idx = (letter.to_ascii_uppercase() as usize).checked_sub('A' as usize)?;
    if letter.is_ascii_alphabetic() && idx < option_count {
        Some(idx)
    } else {
        None
    }
}
