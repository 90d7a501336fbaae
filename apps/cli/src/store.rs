//! Per-session grade persistence.

use std::io;
use std::path::{Path, PathBuf};

/// Append-only tally of how often each entry was dictated, rewritten to
/// its grade file in full after every entry so a crash loses at most
/// the in-flight result.
///
/// Keys are entry display strings; insertion order is preserved.
pub struct GradeBook {
    path: PathBuf,
    counts: Vec<(String, u32)>,
}

impl GradeBook {
    /// Create a grade book for this session under `grade_dir`, named
    /// after the word list and the session start time.
    pub fn create(grade_dir: &Path, list_name: &str) -> Self {
        let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
        Self::at(grade_dir.join(format!("{list_name}_{stamp}_grade.txt")))
    }

    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            counts: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bump the attempt count for an entry.
    pub fn bump(&mut self, entry: &str) {
        if let Some((_, count)) = self.counts.iter_mut().find(|(key, _)| key == entry) {
            *count += 1;
        } else {
            self.counts.push((entry.to_string(), 1));
        }
    }

    /// Rewrite the grade file from the current tally.
    pub fn flush(&self) -> io::Result<()> {
        let mut out = String::new();
        for (entry, count) in &self.counts {
            out.push_str(&format!("✅ {entry} (dictated {count} times)\n\n"));
        }
        std::fs::write(&self.path, out)
    }
}
