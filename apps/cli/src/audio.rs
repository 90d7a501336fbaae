//! Audio collaborators: TTS synthesis, playback, MP3 validation.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;
use tokio::sync::{oneshot, Semaphore};
use tokio::task::JoinSet;

/// Concurrent tasks for audio generation and validation.
const WORKER_LIMIT: usize = 32;

/// System players probed in order; `DICTATION_PLAYER` overrides.
const PLAYER_CANDIDATES: &[&str] = &["afplay", "mpg123", "mpv", "ffplay"];

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no usable audio player found (tried {0})")]
    NoPlayer(String),
    #[error("playback thread exited before initializing")]
    InitDropped,
}

/// Playback surface used by the quiz session.
pub trait Playback {
    /// Start playing the clip at `path`, replacing whatever is playing.
    /// Non-blocking; a missing or unplayable file is logged and skipped.
    fn play(&self, path: &Path);

    /// Invalid-input notification.
    fn beep(&self);
}

/// Playback through an external system player.
///
/// A dedicated thread probes for a player binary, reports readiness
/// over a oneshot, then consumes clip paths from a channel; each new
/// clip replaces the previous one. [`Player::spawn`] hands back the
/// readiness future; await it before the first playback.
pub struct Player {
    tx: mpsc::Sender<PathBuf>,
}

impl Player {
    pub fn spawn() -> (Self, oneshot::Receiver<Result<(), AudioError>>) {
        let (tx, rx) = mpsc::channel::<PathBuf>();
        let (ready_tx, ready_rx) = oneshot::channel();

        thread::spawn(move || {
            let Some(player) = find_player() else {
                let _ = ready_tx.send(Err(AudioError::NoPlayer(
                    PLAYER_CANDIDATES.join(", "),
                )));
                return;
            };
            tracing::debug!(player, "audio player ready");
            let _ = ready_tx.send(Ok(()));

            let mut current: Option<Child> = None;
            for path in rx {
                if let Some(mut child) = current.take() {
                    let _ = child.kill();
                    let _ = child.wait();
                }

                match play_command(&player, &path).spawn() {
                    Ok(child) => current = Some(child),
                    Err(err) => {
                        tracing::warn!(path = %path.display(), %err, "failed to start playback");
                    }
                }
            }

            if let Some(mut child) = current.take() {
                let _ = child.kill();
                let _ = child.wait();
            }
        });

        (Self { tx }, ready_rx)
    }
}

impl Playback for Player {
    fn play(&self, path: &Path) {
        if self.tx.send(path.to_path_buf()).is_err() {
            tracing::debug!("playback thread is gone, skipping clip");
        }
    }

    fn beep(&self) {
        print!("\x07");
        let _ = std::io::stdout().flush();
    }
}

/// First player binary that responds, or the `DICTATION_PLAYER` override.
fn find_player() -> Option<String> {
    if let Some(player) = std::env::var_os("DICTATION_PLAYER") {
        return Some(player.to_string_lossy().into_owned());
    }

    PLAYER_CANDIDATES
        .iter()
        .find(|bin| {
            Command::new(bin)
                .arg("--help")
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .is_ok()
        })
        .map(|bin| bin.to_string())
}

fn play_command(player: &str, path: &Path) -> Command {
    let mut cmd = Command::new(player);
    match player.rsplit('/').next().unwrap_or(player) {
        "mpg123" => {
            cmd.arg("-q");
        }
        "mpv" => {
            cmd.args(["--no-video", "--really-quiet"]);
        }
        "ffplay" => {
            cmd.args(["-nodisp", "-autoexit", "-loglevel", "quiet"]);
        }
        _ => {}
    }
    cmd.arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

/// Text-to-speech synthesis client.
#[derive(Clone)]
pub struct Tts {
    client: reqwest::Client,
}

const TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";

impl Tts {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Synthesize `text` to an MP3 at `path`. Idempotent: an existing
    /// file is kept. Returns whether the file exists afterwards; a
    /// synthesis failure is logged and retried on the next full scan.
    pub async fn generate(&self, text: &str, path: &Path) -> bool {
        if path.exists() {
            return true;
        }

        match self.fetch(text).await {
            Ok(bytes) => match tokio::fs::write(path, &bytes).await {
                Ok(()) => {
                    tracing::info!(text, path = %path.display(), "generated audio");
                    true
                }
                Err(err) => {
                    tracing::warn!(text, %err, "failed to write audio file");
                    false
                }
            },
            Err(err) => {
                tracing::warn!(text, %err, "audio synthesis failed");
                false
            }
        }
    }

    async fn fetch(&self, text: &str) -> reqwest::Result<Vec<u8>> {
        let bytes = self
            .client
            .get(TTS_ENDPOINT)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", "en"),
                ("q", text),
            ])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

impl Default for Tts {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate audio for every `(text, target path)` job with a bounded
/// worker pool. Returns how many files exist afterwards.
pub async fn generate_all(tts: &Tts, jobs: Vec<(String, PathBuf)>) -> usize {
    let semaphore = Arc::new(Semaphore::new(WORKER_LIMIT));
    let mut set = JoinSet::new();

    for (text, path) in jobs {
        let semaphore = semaphore.clone();
        let tts = tts.clone();
        set.spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
            tts.generate(&text, &path).await
        });
    }

    let mut ok = 0;
    while let Some(result) = set.join_next().await {
        if matches!(result, Ok(true)) {
            ok += 1;
        }
    }
    ok
}

/// Validate every `.mp3` under `dir`, deleting files that fail to
/// decode. Returns the number of deletions.
pub async fn delete_invalid(dir: &Path) -> usize {
    let mut paths = Vec::new();
    match std::fs::read_dir(dir) {
        Ok(read_dir) => {
            for dir_entry in read_dir.flatten() {
                let path = dir_entry.path();
                if path.extension().is_some_and(|ext| ext == "mp3") {
                    paths.push(path);
                }
            }
        }
        Err(err) => {
            tracing::warn!(dir = %dir.display(), %err, "cannot scan audio directory");
            return 0;
        }
    }

    let semaphore = Arc::new(Semaphore::new(WORKER_LIMIT));
    let mut set = JoinSet::new();

    for path in paths {
        let semaphore = semaphore.clone();
        set.spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
            tokio::task::spawn_blocking(move || check_and_delete(&path))
                .await
                .unwrap_or(false)
        });
    }

    let mut deleted = 0;
    while let Some(result) = set.join_next().await {
        if matches!(result, Ok(true)) {
            deleted += 1;
        }
    }
    deleted
}

/// Returns true when the file was invalid and has been removed.
fn check_and_delete(path: &Path) -> bool {
    if is_valid_mp3(path) {
        return false;
    }

    tracing::warn!(path = %path.display(), "not a valid MP3 file, deleting");
    if let Err(err) = std::fs::remove_file(path) {
        tracing::warn!(path = %path.display(), %err, "failed to delete invalid file");
        return false;
    }
    true
}

fn is_valid_mp3(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };

    let stream = MediaSourceStream::new(Box::new(file), Default::default());
    let mut hint = Hint::new();
    hint.with_extension("mp3");

    symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .is_ok()
}
