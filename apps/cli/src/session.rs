//! The interactive quiz session.
//!
//! Per entry: spelling dictation (with a reinforcement retry loop),
//! then a multiple-choice meaning question. Wrong entries are re-queued
//! and the whole pass repeats until one pass finishes with zero wrong
//! answers. The attempt tally is flushed to the grade file after every
//! entry.

use dictation_core::{
    align_strings, compare_answers, normalize, parse_choice, DistractorConfig, Entry,
    MatchStrategy, MeaningQuestion, QuizOutcome, SemanticScorer,
};
use rand::Rng;
use std::path::PathBuf;

use crate::audio::Playback;
use crate::prompt::Prompter;
use crate::store::GradeBook;

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub strategy: MatchStrategy,
    pub distractor: DistractorConfig,
}

pub struct Session<'a, P: Prompter, R: Rng> {
    entries: Vec<Entry>,
    pool: &'a [String],
    audio_dir: PathBuf,
    playback: &'a dyn Playback,
    scorer: Option<&'a dyn SemanticScorer>,
    grades: GradeBook,
    config: SessionConfig,
    prompter: P,
    rng: R,
}

impl<'a, P: Prompter, R: Rng> Session<'a, P, R> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        entries: Vec<Entry>,
        pool: &'a [String],
        audio_dir: PathBuf,
        playback: &'a dyn Playback,
        scorer: Option<&'a dyn SemanticScorer>,
        grades: GradeBook,
        config: SessionConfig,
        prompter: P,
        rng: R,
    ) -> Self {
        Self {
            entries,
            pool,
            audio_dir,
            playback,
            scorer,
            grades,
            config,
            prompter,
            rng,
        }
    }

    /// Run passes until one completes with no wrong entries.
    pub fn run(&mut self) {
        let mut entries = std::mem::take(&mut self.entries);
        let mut total = entries.len();
        let mut position = 0;

        loop {
            let mut wrong = Vec::new();

            for entry in &entries {
                position += 1;
                let kind = if entry.is_phrase() { "Phrase" } else { "Word" };
                println!("\n📖 {kind} {position}/{total}:");

                self.grades.bump(&entry.to_string());

                if !self.dictate(entry) {
                    wrong.push(entry.clone());
                    total += 1;
                }

                if let Err(err) = self.grades.flush() {
                    tracing::error!(path = %self.grades.path().display(), %err,
                        "failed to write grade file");
                }
            }

            if wrong.is_empty() {
                println!("Dictation finished! 🎉");
                return;
            }
            entries = wrong;
        }
    }

    /// One full entry: spelling, then meaning. Returns the terminal
    /// correct/incorrect verdict that decides re-queueing.
    fn dictate(&mut self, entry: &Entry) -> bool {
        let answer = loop {
            if let Some(answer) = self.read_spelling(entry) {
                break answer;
            }
        };

        let result = compare_answers(&answer, entry.english(), self.config.strategy);
        println!("{result}");

        if !result.is_correct {
            println!("❌ Incorrect! {entry}");
            self.retry_spelling(entry);
            return false;
        }

        if self.ask_meaning(entry) != QuizOutcome::Right {
            println!("❌ Incorrect! {entry}");
            return false;
        }

        println!("✅ Correct! {entry}");
        true
    }

    /// Read one spelling attempt. Plays the audio, rejects empty input
    /// and answers whose word/phrase shape contradicts the entry.
    fn read_spelling(&mut self, entry: &Entry) -> Option<String> {
        self.playback.play(&entry.audio_path(&self.audio_dir));

        let answer = self.prompter.read_line("> ");
        let answer = answer.trim_matches([' ', '\u{3000}']).to_string();
        if answer.is_empty() {
            return None;
        }

        if answer.contains(' ') != entry.is_phrase() {
            if entry.is_phrase() {
                println!("⚠️ This entry is a phrase!");
            } else {
                println!("⚠️ This entry is a word!");
            }
            self.playback.beep();
            return None;
        }

        Some(answer)
    }

    /// Reinforcement loop after a misspelling: replay the audio and
    /// re-prompt until the exact spelling comes back. Does not affect
    /// scoring; the entry is already marked wrong.
    fn retry_spelling(&mut self, entry: &Entry) {
        let target = normalize(entry.english());
        loop {
            self.playback.play(&entry.audio_path(&self.audio_dir));
            let retry = self.prompter.read_line("Try again: ");
            if normalize(&retry) == target {
                return;
            }
        }
    }

    /// Meaning question, including the "answer not present" branch:
    /// claiming the answer is absent leads to a second question with
    /// the real meaning guaranteed present, and that outcome is final.
    fn ask_meaning(&mut self, entry: &Entry) -> QuizOutcome {
        let outcome = self.ask_meaning_question(entry, true);
        if outcome == QuizOutcome::NotExist {
            return self.ask_meaning_question(entry, false);
        }
        outcome
    }

    fn ask_meaning_question(&mut self, entry: &Entry, allow_none: bool) -> QuizOutcome {
        let mut config = self.config.distractor.clone();
        if !allow_none {
            config.none_probability = 0.0;
        }

        let question = MeaningQuestion::build(
            entry.chinese(),
            self.pool,
            &config,
            self.scorer,
            &mut self.rng,
        );
        self.render(&question);

        loop {
            let input = self.prompter.read_line("Your choice: ");
            match parse_choice(&input, question.option_count()) {
                Some(choice) => return question.grade(choice),
                None => {
                    println!("Invalid choice.");
                    self.playback.beep();
                }
            }
        }
    }

    fn render(&self, question: &MeaningQuestion) {
        let options = question.options();
        // The left column mixes full- and half-width glyphs, so pad the
        // two left-hand options to the same visual width.
        let (first, third) = align_strings(&options[0], &options[2]);

        println!("🌐 Please choose the correct Chinese translation:");
        println!("   A. {first}   B. {}", options[1]);
        println!("   C. {third}   D. {}", options[3]);
        if let Some(none) = options.get(4) {
            println!("   E. {none}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Playback;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::path::Path;

    struct ScriptedPrompter {
        lines: VecDeque<String>,
    }

    impl ScriptedPrompter {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn read_line(&mut self, _prompt: &str) -> String {
            self.lines.pop_front().expect("script exhausted")
        }
    }

    #[derive(Default)]
    struct NullPlayback {
        plays: Cell<usize>,
    }

    impl Playback for NullPlayback {
        fn play(&self, _path: &Path) {
            self.plays.set(self.plays.get() + 1);
        }

        fn beep(&self) {}
    }

    fn entry(line: &str) -> Entry {
        Entry::parse(line).unwrap()
    }

    fn pool() -> Vec<String> {
        ["苹果", "银行", "河岸", "学校", "朋友"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Letter of the slot holding the correct meaning, replayed from
    /// the same seed the session will use.
    fn correct_letter(target: &str, pool: &[String], config: &DistractorConfig, seed: u64) -> String {
        let mut rng = StdRng::seed_from_u64(seed);
        let question = MeaningQuestion::build(target, pool, config, None, &mut rng);
        letter(question.correct_index().unwrap())
    }

    fn letter(index: usize) -> String {
        char::from(b'A' + index as u8).to_string()
    }

    fn run_session(
        entries: Vec<Entry>,
        pool: &[String],
        config: SessionConfig,
        script: &[&str],
        seed: u64,
    ) -> (String, usize) {
        let dir = tempfile::tempdir().unwrap();
        let grade_path = dir.path().join("test_grade.txt");
        let playback = NullPlayback::default();

        let mut session = Session::new(
            entries,
            pool,
            dir.path().to_path_buf(),
            &playback,
            None,
            GradeBook::at(grade_path.clone()),
            config,
            ScriptedPrompter::new(script),
            StdRng::seed_from_u64(seed),
        );
        session.run();

        (
            std::fs::read_to_string(&grade_path).unwrap(),
            playback.plays.get(),
        )
    }

    #[test]
    fn perfect_answer_finishes_in_one_pass() {
        let pool = pool();
        let config = SessionConfig::default();
        let choice = correct_letter("苹果", &pool, &config.distractor, 7);

        let (grades, plays) = run_session(
            vec![entry("apple 苹果")],
            &pool,
            config,
            &["apple", &choice],
            7,
        );

        assert_eq!(grades, "✅ apple 苹果 (dictated 1 times)\n\n");
        assert_eq!(plays, 1);
    }

    #[test]
    fn misspelling_requeues_the_entry() {
        let pool = pool();
        let config = SessionConfig::default();
        // Pass 1 never reaches the meaning question, so the session's
        // first RNG draw happens in pass 2.
        let choice = correct_letter("苹果", &pool, &config.distractor, 11);

        let (grades, _) = run_session(
            vec![entry("apple 苹果")],
            &pool,
            config,
            &["appel", "nope", "apple", "apple", &choice],
            11,
        );

        assert_eq!(grades, "✅ apple 苹果 (dictated 2 times)\n\n");
    }

    #[test]
    fn empty_and_misshaped_input_reprompt_without_penalty() {
        let pool = pool();
        let config = SessionConfig::default();
        let choice = correct_letter("逃跑", &pool, &config.distractor, 3);

        // Empty, then a single word for a phrase entry, then correct.
        let (grades, plays) = run_session(
            vec![entry("run away 逃跑")],
            &pool,
            config,
            &["", "run", "run away", &choice],
            3,
        );

        assert_eq!(grades, "✅ run away 逃跑 (dictated 1 times)\n\n");
        // Audio replayed on every spelling prompt.
        assert_eq!(plays, 3);
    }

    #[test]
    fn invalid_choice_reprompts() {
        let pool = pool();
        let config = SessionConfig::default();
        let choice = correct_letter("苹果", &pool, &config.distractor, 5);

        let (grades, _) = run_session(
            vec![entry("apple 苹果")],
            &pool,
            config,
            &["apple", "z", "99", &choice],
            5,
        );

        assert_eq!(grades, "✅ apple 苹果 (dictated 1 times)\n\n");
    }

    #[test]
    fn wrong_meaning_requeues_the_entry() {
        let pool = pool();
        let config = SessionConfig::default();

        let mut probe = StdRng::seed_from_u64(13);
        let q1 = MeaningQuestion::build("苹果", &pool, &config.distractor, None, &mut probe);
        let wrong1 = letter((q1.correct_index().unwrap() + 1) % 4);
        let q2 = MeaningQuestion::build("苹果", &pool, &config.distractor, None, &mut probe);
        let right2 = letter(q2.correct_index().unwrap());

        let (grades, _) = run_session(
            vec![entry("apple 苹果")],
            &pool,
            config,
            &["apple", &wrong1, "apple", &right2],
            13,
        );

        assert_eq!(grades, "✅ apple 苹果 (dictated 2 times)\n\n");
    }

    #[test]
    fn claiming_not_present_forces_a_real_choice() {
        let pool = pool();
        let config = SessionConfig {
            strategy: MatchStrategy::Phonetic,
            distractor: DistractorConfig {
                none_probability: 1.0,
                ..DistractorConfig::default()
            },
        };

        // Replay both builds: the none-mode question, then the forced
        // re-ask with the target present and no none slot.
        let mut probe = StdRng::seed_from_u64(21);
        let q1 = MeaningQuestion::build("苹果", &pool, &config.distractor, None, &mut probe);
        assert_eq!(q1.correct_index(), None);
        let no_none = DistractorConfig {
            none_probability: 0.0,
            ..config.distractor.clone()
        };
        let q2 = MeaningQuestion::build("苹果", &pool, &no_none, None, &mut probe);
        let right2 = letter(q2.correct_index().unwrap());

        let (grades, _) = run_session(
            vec![entry("apple 苹果")],
            &pool,
            config,
            &["apple", "E", &right2],
            21,
        );

        assert_eq!(grades, "✅ apple 苹果 (dictated 1 times)\n\n");
    }
}
