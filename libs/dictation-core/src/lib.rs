//! Core dictation-trainer library, free of I/O.
//!
//! Provides:
//! - Word-list parsing and canonical formatting
//! - Text normalization and fuzzy answer matching (plain and
//!   phonetically weighted edit distance)
//! - Distractor selection for meaning questions
//! - Full-width/half-width visual alignment
//! - Shared types (Entry, QuizOutcome) and an explicit memo cache

pub mod align;
pub mod cache;
pub mod distractor;
pub mod matching;
pub mod normalize;
pub mod types;
pub mod wordlist;

pub use align::{align_strings, count_widths};
pub use cache::Memo;
pub use distractor::{
    parse_choice, CachedScorer, CharOverlapScorer, DistractorConfig, MeaningQuestion,
    SemanticScorer, NONE_LABEL,
};
pub use matching::{compare_answers, levenshtein_distance, similarity, MatchResult, MatchStrategy};
pub use normalize::normalize;
pub use types::{Entry, QuizOutcome};
pub use wordlist::{format_word_list, parse_word_list};
