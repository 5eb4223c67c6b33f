/**
 * Definitions of data structures used by several modules, such as `QuizError` and the
 * structs that hold command-line arguments.
 *
 * Version: October 2026
 */
use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use structopt::StructOpt;


pub type Result<T> = ::std::result::Result<T, QuizError>;


#[derive(Debug)]
pub enum QuizError {
    /// For when the application directory cannot be created.
    CannotMakeAppDir(PathBuf),
    CannotWriteToFile(PathBuf),
    Io(io::Error),
    /// For JSON errors.
    Json(serde_json::Error),
    Sql(rusqlite::Error),
    /// For malformed source tables.
    Table(csv::Error),
    /// The source table lacks a `Bezeichnung` or `Bedeutung` column. `found` holds the
    /// headers that were actually present.
    MissingColumns { found: Vec<String> },
    /// A session operation was called in a phase that does not allow it.
    InvalidTransition { operation: &'static str, phase: &'static str },
    ReadlineInterrupted,
    /// The user asked to see the previous answer of the round.
    SignalPrevious,
}


impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            QuizError::CannotMakeAppDir(ref path) => {
                write!(
                    f,
                    "unable to create application directory at {}",
                    path.to_string_lossy()
                )
            },
            QuizError::CannotWriteToFile(ref path) => {
                write!(f, "cannot write to file '{}'", path.to_string_lossy())
            },
            QuizError::Io(ref err) => {
                write!(f, "IO error ({})", err)
            },
            QuizError::Json(ref err) => {
                write!(f, "could not parse JSON ({})", err)
            },
            QuizError::Sql(ref err) => {
                write!(f, "SQL error ({})", err)
            },
            QuizError::Table(ref err) => {
                write!(f, "could not read table ({})", err)
            },
            QuizError::MissingColumns { ref found } => {
                write!(
                    f,
                    "the table must have the columns 'Bezeichnung' and 'Bedeutung' \
                     (found: {})",
                    if found.is_empty() { String::from("none") } else { found.join(", ") }
                )
            },
            QuizError::InvalidTransition { operation, phase } => {
                write!(f, "cannot {} while the session is {}", operation, phase)
            },
            QuizError::ReadlineInterrupted | QuizError::SignalPrevious => {
                Ok(())
            },
        }
    }
}


impl error::Error for QuizError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            QuizError::Io(ref err) => Some(err),
            QuizError::Json(ref err) => Some(err),
            QuizError::Sql(ref err) => Some(err),
            QuizError::Table(ref err) => Some(err),
            _ => None,
        }
    }
}


pub fn is_broken_pipe(e: &QuizError) -> bool {
    if let QuizError::Io(e) = e {
        if let io::ErrorKind::BrokenPipe = e.kind() {
            return true;
        }
    }
    false
}


/// Holds the command-line configuration for the application.
#[derive(StructOpt)]
#[structopt(name = "memtrain", about = "Drill a table of terms and meanings.")]
pub struct Options {
    /// Keep mistake statistics and progress in a particular directory.
    #[structopt(short = "d", long = "directory", parse(from_os_str))]
    pub directory: Option<PathBuf>,
    /// Do not emit colorized output.
    #[structopt(long = "no-color")]
    pub no_color: bool,
    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(StructOpt)]
pub enum Command {
    /// Take a quiz over a table of terms.
    #[structopt(name = "take")]
    Take(TakeOptions),
    /// List the most frequently missed terms.
    #[structopt(name = "stats")]
    Stats(StatsOptions),
    /// Delete all mistake statistics.
    #[structopt(name = "reset")]
    Reset(ResetOptions),
    /// Show the accuracy of previous rounds.
    #[structopt(name = "history")]
    History(HistoryOptions),
}

#[derive(StructOpt)]
pub struct TakeOptions {
    /// Path to the table with the columns 'Bezeichnung' and 'Bedeutung'.
    #[structopt(parse(from_os_str))]
    pub table: PathBuf,
    /// Number of questions per round (0 asks every term).
    #[structopt(short = "n", default_value = "20")]
    pub num_to_ask: usize,
    /// Show the meaning and ask for the designation.
    #[structopt(long = "flip")]
    pub flip: bool,
    /// Ask the questions in the order they appear in the table.
    #[structopt(long = "in-order")]
    pub in_order: bool,
    /// Stop after one round instead of offering another.
    #[structopt(long = "once")]
    pub once: bool,
}

#[derive(StructOpt)]
pub struct StatsOptions {
    /// Only show the first `n` entries.
    #[structopt(short = "n")]
    pub num_to_show: Option<usize>,
}

#[derive(StructOpt)]
pub struct ResetOptions {
    /// Delete without prompting for confirmation.
    #[structopt(short = "f", long = "force")]
    pub force: bool,
}

#[derive(StructOpt)]
pub struct HistoryOptions {
    /// Only show the last `n` rounds.
    #[structopt(short = "n")]
    pub num_to_show: Option<usize>,
    /// Print the rounds as JSON.
    #[structopt(long = "json")]
    pub json: bool,
}

