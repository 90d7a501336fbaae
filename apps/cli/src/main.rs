//! Interactive vocabulary dictation trainer.

mod audio;
mod config;
mod preprocess;
mod prompt;
mod session;
mod store;
mod words;

use anyhow::{Context, Result};
use dictation_core::{CachedScorer, CharOverlapScorer};
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::audio::{AudioError, Player, Tts};
use crate::config::Config;
use crate::prompt::{Prompter, StdinPrompter};
use crate::session::{Session, SessionConfig};
use crate::store::GradeBook;
use crate::words::Library;

/// Entries drawn for a mixed review round.
const REVIEW_SIZE: usize = 30;

enum ListChoice {
    File(PathBuf),
    Review,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    config.ensure_dirs().context("creating data directories")?;

    // The player probe runs on its own thread; the quiz waits for it.
    let (player, player_ready) = Player::spawn();
    let tts = Tts::new();

    let library = preprocess::prepare(&config, &tts).await?;
    if library.files.is_empty() {
        println!(
            "No word lists found in {}. Add some *.md files and run again.",
            config.words_dir.display()
        );
        return Ok(());
    }

    match player_ready.await.unwrap_or(Err(AudioError::InitDropped)) {
        Ok(()) => {}
        Err(err) => tracing::warn!(%err, "audio playback unavailable"),
    }

    let mut prompter = StdinPrompter;
    let mut rng = rand::thread_rng();

    let (list_name, mut entries) = match choose_list(&library, &mut prompter) {
        ListChoice::File(path) => (words::list_name(&path), words::load_entries(&path)?),
        ListChoice::Review => {
            let mut all = Vec::new();
            for file in &library.files {
                all.extend(words::load_entries(file)?);
            }
            all.shuffle(&mut rng);
            all.truncate(REVIEW_SIZE);
            ("REVIEW".to_string(), all)
        }
    };
    entries.shuffle(&mut rng);

    if entries.is_empty() {
        println!("The chosen list has no entries.");
        return Ok(());
    }

    println!("\n🎧 Start dictation for \"{list_name}\".");

    let scorer = CachedScorer::new(CharOverlapScorer);
    let mut session = Session::new(
        entries,
        &library.pool,
        config.audio_dir.clone(),
        &player,
        Some(&scorer),
        GradeBook::create(&config.grade_dir, &list_name),
        SessionConfig::default(),
        prompter,
        rng,
    );
    session.run();

    open_directory(&config.grade_dir);
    Ok(())
}

/// Numbered menu over the word lists plus a final REVIEW item.
fn choose_list(library: &Library, prompter: &mut impl Prompter) -> ListChoice {
    println!("\n📖 Dictation files:\n");
    for (i, file) in library.files.iter().enumerate() {
        println!(" 💿 {} {}", i + 1, words::list_name(file));
    }
    println!(" 💿 {} REVIEW\n", library.files.len() + 1);

    loop {
        let input = prompter.read_line("🎵 Please choose a dictation file id: ");
        let Ok(index) = input.trim_matches([' ', '\u{3000}']).parse::<usize>() else {
            continue;
        };

        if (1..=library.files.len()).contains(&index) {
            println!();
            return ListChoice::File(library.files[index - 1].clone());
        }
        if index == library.files.len() + 1 {
            return ListChoice::Review;
        }
    }
}

/// Best-effort "open the grade folder" after a finished session.
fn open_directory(dir: &Path) {
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(not(target_os = "macos"))]
    let opener = "xdg-open";

    if let Err(err) = Command::new(opener).arg(dir).spawn() {
        tracing::warn!(dir = %dir.display(), %err, "could not open grade directory");
    }
}
