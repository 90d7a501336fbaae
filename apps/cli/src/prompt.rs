//! Blocking line input.

use std::io::{self, BufRead, Write};

/// Source of typed user input.
///
/// Abstracted so session tests can script the interaction. An aborted
/// or failed read is reported as an empty line, which the session
/// treats as invalid input, never as cancellation.
pub trait Prompter {
    fn read_line(&mut self, prompt: &str) -> String;
}

/// Reads from stdin, echoing the prompt to stdout first.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn read_line(&mut self, prompt: &str) -> String {
        print!("{prompt}");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => line.trim_end_matches(['\r', '\n']).to_string(),
            Err(err) => {
                tracing::warn!(%err, "failed to read stdin");
                String::new()
            }
        }
    }
}
