/**
 * The command-line user interface for taking quizzes.
 *
 * Version: October 2026
 */
use colored::*;

use super::common::{QuizError, Result};
use super::iohelper::{prettyprint, prettyprint_colored, prompt_raw};
use super::mistakes::{split_signature, MistakeStats};
use super::progress::ProgressEntry;
use super::quiz::{AnswerOutcome, AnswerRecord, RoundSummary};


pub struct CmdUI {
    /// Have we finished printing out the prologue?
    finished_prologue: bool,
}


impl CmdUI {
    pub fn new() -> Self {
        Self { finished_prologue: false }
    }

    pub fn text(&mut self, text: &str, number: usize, total: usize) -> Result<()> {
        if !self.finished_prologue {
            my_print!("\n")?;
            self.finished_prologue = true;
        }

        let prefix = format!("  ({}/{}) ", number, total);
        prettyprint_colored(&text, Some(&prefix), None, Some(Color::Cyan))?;
        my_print!("\n")
    }

    /// Read an answer as typed, which may be blank. Entering `!prev` signals that the
    /// user wants to see their previous answer again.
    pub fn prompt(&mut self) -> Result<Option<String>> {
        let response = prompt_raw("> ")?;
        if let Some(response) = response.as_ref() {
            if response.trim() == "!prev" {
                return Err(QuizError::SignalPrevious);
            }
        }
        Ok(response)
    }

    pub fn outcome(&mut self, outcome: &AnswerOutcome) -> Result<()> {
        prettyprint(&outcome_message(outcome), None)?;

        if let Some(warning) = &outcome.warning {
            self.warning(&format!("{}", warning))?;
        }
        Ok(())
    }

    pub fn previous(&mut self, previous: Option<&AnswerRecord>) -> Result<()> {
        if let Some(previous) = previous {
            let verdict = if previous.correct { "correct".green() } else { "incorrect".red() };
            prettyprint(
                &format!(
                    "Previously: {} -> you said {} ({}; the answer was {}).",
                    previous.prompt, previous.response, verdict, previous.solution,
                ),
                Some("  "),
            )
        } else {
            my_println!("  No previous answer in this round.")
        }
    }

    pub fn status(&mut self, text: &str) -> Result<()> {
        my_println!("{}", text)
    }

    pub fn warning(&mut self, text: &str) -> Result<()> {
        prettyprint_colored(
            &format!("Warning: {}", text), Some("  "), Some(Color::Red), None)
    }

    pub fn summary(&mut self, summary: &RoundSummary) -> Result<()> {
        my_print!("\n\n")?;
        if summary.round_total == 0 {
            my_println!("No results for this round.")?;
        } else {
            my_print!("This round: ")?;
            my_print!("{}", format!("{}", summary.round_correct).cyan())?;
            my_print!(" out of ")?;
            my_print!("{}", format!("{}", summary.round_total).cyan())?;
            if summary.round_total == 1 {
                my_println!(" question correct")?;
            } else {
                my_println!(" questions correct")?;
            }

            if summary.wrong.is_empty() {
                my_println!("  {}", "No incorrect answers this round.".green())?;
            } else {
                my_println!("\nIncorrect answers:")?;
                for wrong in summary.wrong.iter() {
                    let prefix = format!("  {} ", "-".red());
                    prettyprint(
                        &format!(
                            "{} = {} (you said {})",
                            wrong.prompt, wrong.solution.green(), wrong.response,
                        ),
                        Some(&prefix),
                    )?;
                }
            }
        }

        my_print!("Total: ")?;
        my_print!("{}", format!("{}", summary.score).cyan())?;
        my_print!(" / ")?;
        my_println!("{}", format!("{}", summary.cumulative_total).cyan())?;

        if let Some(warning) = &summary.progress_warning {
            self.warning(&format!("could not save progress ({})", warning))?;
        }
        Ok(())
    }

    /// List mistake statistics, most frequently missed first.
    pub fn mistakes(&mut self, stats: &MistakeStats, num_to_show: Option<usize>) -> Result<()> {
        if stats.is_empty() {
            return my_println!("No mistakes have been recorded.");
        }

        let mut sorted: Vec<(&String, &u64)> = stats.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        if let Some(n) = num_to_show {
            sorted.truncate(n);
        }

        for (signature, count) in sorted.iter() {
            let first_prefix = format!("{:>4}x  ", count);
            let text = match split_signature(signature) {
                Some((prompt, solution)) => format!("{} = {}", prompt, solution),
                None => signature.to_string(),
            };
            prettyprint_colored(&text, Some(&first_prefix), None, Some(Color::Cyan))?;
        }
        Ok(())
    }

    /// List previous rounds, oldest first.
    pub fn history(&mut self, entries: &[ProgressEntry]) -> Result<()> {
        if entries.is_empty() {
            return my_println!("No rounds have been recorded.");
        }

        for entry in entries.iter() {
            let when = chrono::DateTime::parse_from_rfc3339(&entry.timestamp)
                .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|_| entry.timestamp.clone());
            my_println!(
                "{}  {}  {:>3} / {:<3} {}",
                when,
                format!("{:>5.1}%", entry.percentage).cyan(),
                entry.correct,
                entry.total,
                bar(entry.percentage),
            )?;
        }
        Ok(())
    }
}


fn outcome_message(outcome: &AnswerOutcome) -> String {
    if outcome.correct {
        format!("{}", "Correct!".green())
    } else {
        format!("{} The correct answer was {}.", "Incorrect.".red(), outcome.solution.green())
    }
}


/// Draw `percentage` as a bar of up to 20 characters.
fn bar(percentage: f64) -> String {
    let filled = ((percentage / 5.0).round() as usize).min(20);
    format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled))
}
