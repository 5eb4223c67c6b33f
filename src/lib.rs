/**
 * Drill a table of terms and their meanings, asking more often about the terms that
 * have been missed before.
 *
 * Version: October 2026
 */
#[macro_use]
pub mod iohelper;
pub mod common;
pub mod mistakes;
pub mod normalize;
pub mod persistence;
pub mod progress;
pub mod quiz;
pub mod repetition;
pub mod ui;

pub use common::{QuizError, Result};
pub use mistakes::{signature, MistakeStats, MistakeStore};
pub use normalize::{check_answer, normalize};
pub use progress::{ProgressEntry, ProgressLog, SqliteProgressLog};
pub use quiz::{Direction, Phase, QuizSession, RoundOptions, RoundSummary, TermPair};
