//! Text normalization applied before any answer comparison.

/// Normalize a string for comparison: trim outer spaces (ASCII and
/// U+3000), collapse internal whitespace runs to single ASCII spaces,
/// and lowercase.
///
/// Both the typed answer and the target go through this, so comparisons
/// are case- and whitespace-insensitive but punctuation-sensitive.
/// Idempotent.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
