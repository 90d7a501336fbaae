//! Directory configuration.

use std::io;
use std::path::PathBuf;

/// Where word lists, cached audio and grade files live.
///
/// Defaults match the conventional layout next to the binary; each can
/// be overridden with a `DICTATION_*` environment variable.
#[derive(Debug, Clone)]
pub struct Config {
    pub words_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub grade_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            words_dir: dir_from_env("DICTATION_WORDS_DIR", "./words"),
            audio_dir: dir_from_env("DICTATION_AUDIO_DIR", "./audios"),
            grade_dir: dir_from_env("DICTATION_GRADE_DIR", "./grade"),
        }
    }

    /// Create all three directories if they are missing.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.words_dir)?;
        std::fs::create_dir_all(&self.audio_dir)?;
        std::fs::create_dir_all(&self.grade_dir)?;
        Ok(())
    }
}

fn dir_from_env(var: &str, default: &str) -> PathBuf {
    std::env::var_os(var)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
