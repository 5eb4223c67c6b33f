/**
 * Helper functions for input and output.
 *
 * Version: October 2026
 */
use colored::*;

use rustyline::error::ReadlineError;

use super::common::{QuizError, Result};

#[macro_export]
macro_rules! my_println {
    ($($arg:tt)*) => (
        {
            use std::io::Write;
            writeln!(std::io::stdout(), $($arg)*).map_err($crate::common::QuizError::Io)
        }
    );
}

#[macro_export]
macro_rules! my_print {
    ($($arg:tt)*) => (
        {
            use std::io::Write;
            write!(std::io::stdout(), $($arg)*).map_err($crate::common::QuizError::Io)
        }
    );
}

/// Display a prompt and read a line from standard input continually until the user
/// enters a line with at least one non-whitespace character. If the user presses Ctrl+D
/// then `Ok(None)` is returned. If the user presses Ctrl+C then
/// `Err(QuizError::ReadlineInterrupted)` is returned. Otherwise, `Ok(Some(line))` is
/// returned where `line` is the last line of input the user entered without leading and
/// trailing whitespace.
pub fn prompt(message: &str) -> Result<Option<String>> {
    let mut rl = rustyline::Editor::<()>::new();
    loop {
        let result = rl.readline(message);
        match result {
            Ok(response) => {
                let response = response.trim();
                if !response.is_empty() {
                    return Ok(Some(response.to_string()));
                }
            }
            // Return immediately if the user hits Ctrl+D or Ctrl+C.
            Err(ReadlineError::Interrupted) => {
                return Err(QuizError::ReadlineInterrupted);
            }
            Err(ReadlineError::Eof) => {
                return Ok(None);
            }
            Err(ReadlineError::Io(e)) => {
                return Err(QuizError::Io(e));
            }
            _ => {}
        }
    }
}

/// Display a prompt and read one line from standard input, exactly as entered apart
/// from the line ending. Unlike `prompt`, a blank line is returned as `Ok(Some(""))`.
/// Ctrl+D and Ctrl+C are handled as in `prompt`.
pub fn prompt_raw(message: &str) -> Result<Option<String>> {
    let mut rl = rustyline::Editor::<()>::new();
    match rl.readline(message) {
        Ok(response) => {
            Ok(Some(response.trim_end_matches(|c| c == '\n' || c == '\r').to_string()))
        },
        Err(ReadlineError::Interrupted) => Err(QuizError::ReadlineInterrupted),
        Err(ReadlineError::Eof) => Ok(None),
        Err(ReadlineError::Io(e)) => Err(QuizError::Io(e)),
        Err(_) => Ok(None),
    }
}

/// Prompt the user with a yes-no question and return `true` if they enter yes. "ja"
/// counts as yes too.
pub fn confirm(message: &str) -> Result<bool> {
    match prompt(message)? {
        Some(response) => {
            let response = response.to_lowercase();
            Ok(response.starts_with('y') || response.starts_with('j'))
        },
        None => Ok(false),
    }
}

/// Print `message` to standard output, breaking lines according to the current width
/// of the terminal. Prepend `prefix` to the first line and indent all subsequent lines
/// by its length.
pub fn prettyprint(message: &str, prefix: Option<&str>) -> Result<()> {
    prettyprint_colored(message, prefix, None, None)
}

pub fn prettyprint_colored(
    message: &str,
    prefix: Option<&str>,
    message_color: Option<Color>,
    prefix_color: Option<Color>,
) -> Result<()> {
    let prefix = prefix.unwrap_or("");
    let width = textwrap::termwidth().saturating_sub(prefix.len()).max(20);
    let mut lines = textwrap::wrap_iter(message, width);

    if let Some(first_line) = lines.next() {
        let colored_prefix = color_optional(prefix, prefix_color);
        let colored_line = color_optional(&first_line, message_color);
        my_println!("{}{}", colored_prefix, colored_line)?;
    }

    let indent = " ".repeat(prefix.len());
    for line in lines {
        let colored_line = color_optional(&line, message_color);
        my_println!("{}{}", indent, colored_line)?;
    }
    Ok(())
}

fn color_optional(text: &str, color: Option<Color>) -> ColoredString {
    if let Some(color) = color {
        text.color(color)
    } else {
        text.normal()
    }
}
