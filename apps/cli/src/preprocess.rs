//! Pre-quiz preprocessing: canonicalize word lists, generate missing
//! audio, validate the audio cache.

use anyhow::Result;

use crate::audio::{self, Tts};
use crate::config::Config;
use crate::words::{self, Library};

/// Bring the corpus up to date before the quiz starts.
///
/// Each round rescans the word lists (rewriting them in canonical
/// form), generates missing audio on the worker pool, then validates
/// the audio cache. Deleted corrupt files trigger another round so
/// their replacements are regenerated; a synthesis failure just leaves
/// the file missing for the next run.
pub async fn prepare(config: &Config, tts: &Tts) -> Result<Library> {
    loop {
        let library = words::scan(config)?;

        if !library.missing_audio.is_empty() {
            tracing::info!(count = library.missing_audio.len(), "generating missing audio");
            let jobs = library
                .missing_audio
                .iter()
                .map(|entry| {
                    (
                        entry.english().to_string(),
                        entry.audio_path(&config.audio_dir),
                    )
                })
                .collect();
            let generated = audio::generate_all(tts, jobs).await;
            tracing::info!(generated, "audio generation pass complete");
        }

        let deleted = audio::delete_invalid(&config.audio_dir).await;
        if deleted == 0 {
            return Ok(library);
        }
        tracing::info!(deleted, "removed corrupt audio, rescanning");
    }
}
