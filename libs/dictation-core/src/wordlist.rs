//! Word-list parsing and canonical formatting.
//!
//! A word list is a UTF-8 text file with one entry per line. Files are
//! rewritten in canonical form after every scan: words before phrases,
//! alphabetical within each group, English column padded for alignment.

use crate::types::Entry;

/// Parse word-list file content, one entry per line.
///
/// Lines that yield no English tokens are dropped.
pub fn parse_word_list(content: &str) -> Vec<Entry> {
    content.lines().filter_map(Entry::parse).collect()
}

/// Sort entries into canonical order and render the file content.
///
/// Order is `(is_phrase, lowercase English)` ascending; the English
/// column is left-padded to the longest English plus one.
pub fn format_word_list(entries: &mut [Entry]) -> String {
    entries.sort_by_key(|e| (e.is_phrase(), e.english().to_lowercase()));

    let width = entries
        .iter()
        .map(|e| e.english().chars().count())
        .max()
        .unwrap_or(0)
        + 1;

    let mut out = String::new();
    for entry in entries.iter() {
        out.push_str(&format!(
            "{:<width$} {}\n\n",
            entry.english(),
            entry.chinese(),
            width = width
        ));
    }
    out
}
