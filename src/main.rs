/**
 * Take a memory quiz over a table of terms from the command line.
 *
 * Version: October 2026
 */
use std::path::Path;

use colored::*;
use log::warn;
use structopt::StructOpt;

use memtrain::common::{
    is_broken_pipe, Command, HistoryOptions, Options, QuizError, ResetOptions, Result,
    StatsOptions, TakeOptions,
};
use memtrain::iohelper::confirm;
use memtrain::persistence;
use memtrain::ui::CmdUI;
use memtrain::{
    my_println, Direction, MistakeStore, ProgressLog, QuizSession, RoundOptions,
    SqliteProgressLog, TermPair,
};


fn main() {
    env_logger::init();
    let options = Options::from_args();

    if options.no_color {
        colored::control::set_override(false);
    }

    let result = run(options);
    if let Err(e) = result {
        if !is_broken_pipe(&e) {
            eprintln!("{}: {}", "Error".red(), e);
            ::std::process::exit(2);
        }
    }
}


pub fn run(options: Options) -> Result<()> {
    let app_dir = persistence::require_app_dir_path(options.directory.as_deref())?;
    match options.cmd {
        Command::Take(take_options) => main_take(&app_dir, take_options),
        Command::Stats(stats_options) => main_stats(&app_dir, stats_options),
        Command::Reset(reset_options) => main_reset(&app_dir, reset_options),
        Command::History(history_options) => main_history(&app_dir, history_options),
    }
}


/// The main function for the `take` subcommand.
pub fn main_take(app_dir: &Path, options: TakeOptions) -> Result<()> {
    let pairs = persistence::load_table(&options.table)?;

    let mut ui = CmdUI::new();
    let store = MistakeStore::new(&persistence::get_mistakes_path(app_dir));
    let mut session = QuizSession::new(store);
    match SqliteProgressLog::open(&persistence::get_progress_path(app_dir)) {
        Ok(progress) => {
            session = session.with_progress(Box::new(progress));
        },
        Err(e) => {
            warn!("could not open progress log: {}", e);
            ui.warning(&format!("progress will not be recorded ({})", e))?;
        }
    }

    let round_options = RoundOptions {
        direction: if options.flip {
            Direction::MeaningToDesignation
        } else {
            Direction::DesignationToMeaning
        },
        count: options.num_to_ask,
        shuffle: !options.in_order,
    };

    match take_rounds(&mut session, &mut ui, &pairs, &round_options, options.once) {
        Err(QuizError::ReadlineInterrupted) => {
            my_println!("\nStopped. Total: {} / {}", session.score(), session.cumulative_total())
        },
        result => result,
    }
}


fn take_rounds(
    session: &mut QuizSession,
    ui: &mut CmdUI,
    pairs: &[TermPair],
    options: &RoundOptions,
    once: bool,
) -> Result<()> {
    session.start_round(pairs, options, true);
    loop {
        while let Some(question) = session.current_question() {
            let prompt = question.prompt.clone();
            let (number, total) = session.position();
            ui.text(&prompt, number, total)?;

            loop {
                match ui.prompt() {
                    Ok(Some(response)) => {
                        let outcome = session.submit_answer(&response)?;
                        ui.outcome(&outcome)?;
                        break;
                    },
                    Ok(None) => {
                        return Err(QuizError::ReadlineInterrupted);
                    },
                    Err(QuizError::SignalPrevious) => {
                        ui.previous(session.previous_answer())?;
                    },
                    Err(e) => {
                        return Err(e);
                    }
                }
            }
        }

        let summary = session.request_summary()?;
        ui.summary(&summary)?;

        if once || !confirm("\nStart the next round? ")? {
            return Ok(());
        }
        session.next_round(pairs, options)?;
    }
}


/// The main function for the `stats` subcommand.
pub fn main_stats(app_dir: &Path, options: StatsOptions) -> Result<()> {
    let store = MistakeStore::new(&persistence::get_mistakes_path(app_dir));
    CmdUI::new().mistakes(&store.snapshot(), options.num_to_show)
}


/// The main function for the `reset` subcommand.
pub fn main_reset(app_dir: &Path, options: ResetOptions) -> Result<()> {
    let store = MistakeStore::new(&persistence::get_mistakes_path(app_dir));
    let ask_prompt = "Are you sure you want to delete all mistake statistics? ";
    if options.force || confirm(ask_prompt)? {
        store.reset()?;
        CmdUI::new().status("Mistake statistics deleted.")?;
    }
    Ok(())
}


/// The main function for the `history` subcommand.
pub fn main_history(app_dir: &Path, options: HistoryOptions) -> Result<()> {
    let progress = SqliteProgressLog::open(&persistence::get_progress_path(app_dir))?;
    let mut entries = progress.list_all()?;
    if let Some(n) = options.num_to_show {
        let skip = entries.len().saturating_sub(n);
        entries.drain(..skip);
    }

    if options.json {
        let serialized = serde_json::to_string_pretty(&entries).map_err(QuizError::Json)?;
        my_println!("{}", serialized)
    } else {
        CmdUI::new().history(&entries)
    }
}
