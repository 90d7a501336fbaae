//! Core types for the dictation trainer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Characters that separate tokens inside a word-list line.
///
/// Covers the ASCII and full-width forms of comma, slash and semicolon,
/// the full-width period, and both space glyphs.
pub const DELIMITERS: [char; 8] = [',', '，', '/', ';', '；', '。', ' ', '\u{3000}'];

/// One vocabulary item: an English word or phrase with its Chinese gloss.
///
/// Parsed once from a word-list line and read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    english: String,
    chinese: String,
}

impl Entry {
    /// Parse one word-list line.
    ///
    /// The line is split on [`DELIMITERS`]; ASCII tokens joined by single
    /// spaces form the English side, everything else joined by `，` forms
    /// the Chinese side. Returns `None` when the line has no English
    /// tokens (blank lines, gloss-only fragments).
    pub fn parse(line: &str) -> Option<Self> {
        let mut english_words: Vec<&str> = Vec::new();
        let mut chinese_words: Vec<&str> = Vec::new();

        for token in line.split(DELIMITERS) {
            if token.is_empty() {
                continue;
            }
            if token.is_ascii() {
                english_words.push(token);
            } else {
                chinese_words.push(token);
            }
        }

        if english_words.is_empty() {
            return None;
        }

        Some(Self {
            english: english_words.join(" "),
            chinese: chinese_words.join("，"),
        })
    }

    pub fn english(&self) -> &str {
        &self.english
    }

    pub fn chinese(&self) -> &str {
        &self.chinese
    }

    /// A phrase is anything with more than one English token.
    pub fn is_phrase(&self) -> bool {
        self.english.contains(' ')
    }

    pub fn audio_file_name(&self) -> String {
        format!("{}.mp3", self.english)
    }

    /// Deterministic audio location for this entry under `audio_dir`.
    pub fn audio_path(&self, audio_dir: &Path) -> PathBuf {
        audio_dir.join(self.audio_file_name())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.english, self.chinese)
    }
}

/// Result of one meaning question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizOutcome {
    /// The correct meaning was chosen.
    Right,
    /// A wrong meaning was chosen.
    Wrong,
    /// The "answer not present" slot was chosen; the question is re-asked
    /// with the real meaning guaranteed present.
    NotExist,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_word_line() {
        let entry = Entry::parse("apple 苹果").unwrap();
        assert_eq!(entry.english(), "apple");
        assert_eq!(entry.chinese(), "苹果");
        assert!(!entry.is_phrase());
    }

    #[test]
    fn parse_phrase_line() {
        let entry = Entry::parse("run away 逃跑").unwrap();
        assert_eq!(entry.english(), "run away");
        assert_eq!(entry.chinese(), "逃跑");
        assert!(entry.is_phrase());
    }

    #[test]
    fn parse_joins_multiple_glosses_with_fullwidth_comma() {
        let entry = Entry::parse("bank 银行，河岸").unwrap();
        assert_eq!(entry.chinese(), "银行，河岸");

        // Mixed delimiter forms collapse to the same separator.
        let entry = Entry::parse("bank 银行/河岸;堤").unwrap();
        assert_eq!(entry.chinese(), "银行，河岸，堤");
    }

    #[test]
    fn parse_discards_lines_without_english() {
        assert_eq!(Entry::parse(""), None);
        assert_eq!(Entry::parse("   "), None);
        assert_eq!(Entry::parse("苹果"), None);
    }

    #[test]
    fn parse_handles_fullwidth_spaces() {
        let entry = Entry::parse("apple\u{3000}苹果").unwrap();
        assert_eq!(entry.english(), "apple");
        assert_eq!(entry.chinese(), "苹果");
    }

    #[test]
    fn audio_path_is_derived_from_english() {
        let entry = Entry::parse("run away 逃跑").unwrap();
        assert_eq!(
            entry.audio_path(Path::new("./audios")),
            PathBuf::from("./audios/run away.mp3")
        );
    }

    #[test]
    fn display_joins_english_and_chinese() {
        let entry = Entry::parse("apple 苹果").unwrap();
        assert_eq!(entry.to_string(), "apple 苹果");
    }
}
