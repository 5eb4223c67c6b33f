/**
 * The persistent record of how often each prompt has been answered incorrectly.
 *
 * The whole store lives in a single JSON object mapping the signature of a
 * (prompt, solution) pair to a count. Every update reads the whole file, changes one
 * entry and writes the whole file back.
 *
 * Version: October 2026
 */
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::common::{QuizError, Result};


/// Separates the prompt from the solution in a signature.
pub const SIGNATURE_SEPARATOR: &str = " → ";


/// Mistake counts keyed by signature.
pub type MistakeStats = BTreeMap<String, u64>;


/// Return the key under which mistakes for `prompt` with `solution` are counted.
pub fn signature(prompt: &str, solution: &str) -> String {
    format!("{}{}{}", prompt, SIGNATURE_SEPARATOR, solution)
}

/// Split a signature back into its prompt and solution.
pub fn split_signature(signature: &str) -> Option<(&str, &str)> {
    let index = signature.find(SIGNATURE_SEPARATOR)?;
    Some((&signature[..index], &signature[index + SIGNATURE_SEPARATOR.len()..]))
}


pub struct MistakeStore {
    path: PathBuf,
}


impl MistakeStore {
    pub fn new(path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every mistake count. A missing file means no mistakes yet; an unreadable
    /// or corrupt file is treated the same way so that statistics never block a quiz.
    pub fn snapshot(&self) -> MistakeStats {
        match fs::read_to_string(&self.path) {
            Ok(data) => {
                match serde_json::from_str(&data) {
                    Ok(stats) => stats,
                    Err(e) => {
                        warn!("ignoring corrupt mistake file {}: {}", self.path.display(), e);
                        MistakeStats::new()
                    }
                }
            },
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
                MistakeStats::new()
            },
            Err(e) => {
                warn!("could not read mistake file {}: {}", self.path.display(), e);
                MistakeStats::new()
            }
        }
    }

    /// Return the number of recorded mistakes for `prompt` with `solution`.
    pub fn count(&self, prompt: &str, solution: &str) -> u64 {
        self.snapshot().get(&signature(prompt, solution)).copied().unwrap_or(0)
    }

    /// Record one more mistake for `prompt` with `solution` and return the new count.
    pub fn increment(&self, prompt: &str, solution: &str) -> Result<u64> {
        let mut stats = self.snapshot();
        let count = stats.entry(signature(prompt, solution)).or_insert(0);
        *count += 1;
        let count = *count;

        self.write(&stats)?;
        debug!("recorded mistake #{} for {:?}", count, signature(prompt, solution));
        Ok(count)
    }

    /// Delete every mistake count. Does nothing if there are none.
    pub fn reset(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(QuizError::Io(e)),
        }
    }

    fn write(&self, stats: &MistakeStats) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .or(Err(QuizError::CannotWriteToFile(self.path.clone())))?;
            }
        }

        let serialized = serde_json::to_string_pretty(stats).map_err(QuizError::Json)?;
        fs::write(&self.path, serialized)
            .or(Err(QuizError::CannotWriteToFile(self.path.clone())))
    }
}
