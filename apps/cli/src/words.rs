//! Word-list files on disk.

use anyhow::{Context, Result};
use dictation_core::{format_word_list, parse_word_list, Entry};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Everything learned from one scan of the words directory.
pub struct Library {
    /// Word-list files, sorted by path.
    pub files: Vec<PathBuf>,
    /// Deduplicated snapshot of every known gloss, the distractor pool.
    pub pool: Vec<String>,
    /// Entries whose audio file does not exist yet.
    pub missing_audio: Vec<Entry>,
}

/// Scan `words/*.md`: load every entry, rewrite each file in canonical
/// order, and collect the gloss pool plus entries with missing audio.
pub fn scan(config: &Config) -> Result<Library> {
    let mut files = list_files(&config.words_dir)?;
    files.sort();

    let mut pool = Vec::new();
    let mut seen = HashSet::new();
    let mut missing_audio = Vec::new();

    for file in &files {
        let mut entries = load_entries(file)?;

        for entry in &entries {
            if seen.insert(dictation_core::normalize(entry.chinese())) {
                pool.push(entry.chinese().to_string());
            }
            if !entry.audio_path(&config.audio_dir).exists() {
                missing_audio.push(entry.clone());
            }
        }

        let formatted = format_word_list(&mut entries);
        std::fs::write(file, formatted)
            .with_context(|| format!("rewriting word list {}", file.display()))?;
    }

    Ok(Library {
        files,
        pool,
        missing_audio,
    })
}

pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading word list {}", path.display()))?;
    Ok(parse_word_list(&content))
}

fn list_files(words_dir: &Path) -> Result<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(words_dir)
        .with_context(|| format!("scanning words directory {}", words_dir.display()))?;

    Ok(read_dir
        .flatten()
        .map(|dir_entry| dir_entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect())
}

/// Display name of a word list: the file name without extension.
pub fn list_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
