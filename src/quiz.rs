/**
 * The quiz session: rounds of questions, answers and scores.
 *
 * A session moves through the phases Idle, InRound, RoundComplete and SummaryShown,
 * then back to InRound for the next round, and only through the methods of
 * `QuizSession`. Answers are kept for the whole
 * session, so the score can be reported both for the current round and cumulatively.
 *
 * Version: October 2026
 */
use log::{debug, warn};
use rand::thread_rng;

use super::common::{QuizError, Result};
use super::mistakes::MistakeStore;
use super::normalize::check_answer;
use super::progress::ProgressLog;
use super::repetition;


/// One row of the source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermPair {
    pub designation: String,
    pub meaning: String,
}


/// Which side of a `TermPair` is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    DesignationToMeaning,
    MeaningToDesignation,
}


/// A `TermPair` as it is asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub solution: String,
}


/// The result of answering one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub prompt: String,
    pub solution: String,
    /// What the user typed, exactly as entered.
    pub response: String,
    pub correct: bool,
}


/// A question answered incorrectly during a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongAnswer {
    pub prompt: String,
    pub solution: String,
    pub response: String,
}


/// How the questions of a round are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOptions {
    pub direction: Direction,
    /// Number of questions; 0 means one per term.
    pub count: usize,
    /// Draw questions from the mistake-weighted pool instead of taking them in order.
    pub shuffle: bool,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    InRound,
    RoundComplete,
    SummaryShown,
}


/// Returned from `QuizSession::submit_answer`.
#[derive(Debug)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub solution: String,
    /// Set if the mistake could not be saved. The answer itself still counts.
    pub warning: Option<QuizError>,
}


/// Statistics for the current round and for the session as a whole.
#[derive(Debug)]
pub struct RoundSummary {
    pub round_correct: usize,
    pub round_total: usize,
    pub wrong: Vec<WrongAnswer>,
    pub score: usize,
    pub cumulative_total: usize,
    /// Set if the round could not be added to the progress log.
    pub progress_warning: Option<QuizError>,
}


struct RoundState {
    questions: Vec<Question>,
    cursor: usize,
    /// Index into the session's answers where this round begins.
    round_offset: usize,
    phase: Phase,
    progress_logged: bool,
}


pub struct QuizSession {
    store: MistakeStore,
    progress: Option<Box<dyn ProgressLog>>,
    answers: Vec<AnswerRecord>,
    round: Option<RoundState>,
}


impl TermPair {
    pub fn new(designation: &str, meaning: &str) -> Self {
        Self { designation: String::from(designation), meaning: String::from(meaning) }
    }

    /// Return the question for this pair when asked in `direction`.
    pub fn orient(&self, direction: Direction) -> Question {
        match direction {
            Direction::DesignationToMeaning => Question {
                prompt: self.designation.clone(),
                solution: self.meaning.clone(),
            },
            Direction::MeaningToDesignation => Question {
                prompt: self.meaning.clone(),
                solution: self.designation.clone(),
            },
        }
    }
}


impl Phase {
    fn describe(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::InRound => "in a round",
            Phase::RoundComplete => "waiting for the round summary",
            Phase::SummaryShown => "showing the round summary",
        }
    }
}


impl QuizSession {
    pub fn new(store: MistakeStore) -> Self {
        Self { store, progress: None, answers: Vec::new(), round: None }
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressLog>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn phase(&self) -> Phase {
        self.round.as_ref().map(|r| r.phase).unwrap_or(Phase::Idle)
    }

    pub fn store(&self) -> &MistakeStore {
        &self.store
    }

    /// Every answer given since the session was last started fresh.
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Number of correct answers in the whole session.
    pub fn score(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }

    pub fn cumulative_total(&self) -> usize {
        self.answers.len()
    }

    /// The questions of the current round, in the order they are asked.
    pub fn questions(&self) -> &[Question] {
        self.round.as_ref().map(|r| r.questions.as_slice()).unwrap_or(&[])
    }

    /// Begin a new round over `pairs`. If `reset_cumulative` is true, all previous
    /// answers are forgotten; otherwise the session score carries over.
    ///
    /// Allowed in any phase. A round without questions is complete immediately.
    pub fn start_round(
        &mut self,
        pairs: &[TermPair],
        options: &RoundOptions,
        reset_cumulative: bool,
    ) {
        if reset_cumulative {
            self.answers.clear();
        }

        let stats = if options.shuffle { self.store.snapshot() } else { Default::default() };
        let mut rng = thread_rng();
        let questions: Vec<Question> =
            repetition::build_round(pairs, options.shuffle, options.count, &stats, &mut rng)
                .iter()
                .map(|pair| pair.orient(options.direction))
                .collect();

        debug!(
            "starting round of {} question(s) after {} answer(s)",
            questions.len(),
            self.answers.len()
        );

        let phase = if questions.is_empty() { Phase::RoundComplete } else { Phase::InRound };
        self.round = Some(RoundState {
            questions,
            cursor: 0,
            round_offset: self.answers.len(),
            phase,
            progress_logged: false,
        });
    }

    /// Begin another round, keeping the session score. Only allowed after the summary
    /// of the previous round has been shown, or before any round.
    pub fn next_round(&mut self, pairs: &[TermPair], options: &RoundOptions) -> Result<()> {
        match self.phase() {
            Phase::Idle | Phase::SummaryShown => {
                self.start_round(pairs, options, false);
                Ok(())
            },
            phase => Err(invalid("start the next round", phase)),
        }
    }

    /// The question waiting for an answer, if the session is in a round.
    pub fn current_question(&self) -> Option<&Question> {
        match &self.round {
            Some(round) if round.phase == Phase::InRound => round.questions.get(round.cursor),
            _ => None,
        }
    }

    /// Return the 1-based number of the current question and the length of the round.
    pub fn position(&self) -> (usize, usize) {
        match &self.round {
            Some(round) => (round.cursor + 1, round.questions.len()),
            None => (0, 0),
        }
    }

    /// Answer the current question with `response`.
    ///
    /// Incorrect answers are counted in the mistake store under the direction in which
    /// the question was asked. If that fails, the answer is still recorded and the
    /// failure is returned as a warning.
    pub fn submit_answer(&mut self, response: &str) -> Result<AnswerOutcome> {
        let phase = self.phase();
        let round = match self.round.as_mut() {
            Some(round) if phase == Phase::InRound => round,
            _ => return Err(invalid("submit an answer", phase)),
        };

        let question = round.questions[round.cursor].clone();
        let correct = check_answer(response, &question.solution);
        self.answers.push(AnswerRecord {
            prompt: question.prompt.clone(),
            solution: question.solution.clone(),
            response: String::from(response),
            correct,
        });

        let mut warning = None;
        if !correct {
            if let Err(e) = self.store.increment(&question.prompt, &question.solution) {
                warn!("could not record mistake: {}", e);
                warning = Some(e);
            }
        }

        round.cursor += 1;
        if round.cursor >= round.questions.len() {
            round.cursor = round.questions.len() - 1;
            round.phase = Phase::RoundComplete;
        }
        debug_assert!(self.answers.len() - round.round_offset <= round.questions.len());

        Ok(AnswerOutcome { correct, solution: question.solution, warning })
    }

    /// The last answer given in the current round, for showing it again. This never
    /// reopens the question: each question is answered exactly once per round.
    pub fn previous_answer(&self) -> Option<&AnswerRecord> {
        let round = self.round.as_ref()?;
        if self.answers.len() > round.round_offset {
            self.answers.last()
        } else {
            None
        }
    }

    /// Finish the round and return its statistics. Only allowed once every question
    /// has been answered.
    ///
    /// The first time a round's summary is shown, the round is added to the progress
    /// log, if there is one. Rounds without answers are not logged.
    pub fn request_summary(&mut self) -> Result<RoundSummary> {
        let phase = self.phase();
        if phase != Phase::RoundComplete {
            return Err(invalid("show the round summary", phase));
        }

        let mut summary = self.summary();
        if let Some(round) = self.round.as_mut() {
            round.phase = Phase::SummaryShown;

            if !round.progress_logged && summary.round_total > 0 {
                round.progress_logged = true;
                if let Some(progress) = self.progress.as_mut() {
                    let timestamp = chrono::Utc::now().to_rfc3339();
                    let result =
                        progress.append(summary.round_correct, summary.round_total, &timestamp);
                    if let Err(e) = result {
                        warn!("could not log progress: {}", e);
                        summary.progress_warning = Some(e);
                    }
                }
            }
        }
        Ok(summary)
    }

    /// Compute the statistics of the current round without changing phase.
    pub fn summary(&self) -> RoundSummary {
        let offset = self.round.as_ref().map(|r| r.round_offset).unwrap_or(0);
        let recent = &self.answers[offset..];

        RoundSummary {
            round_correct: recent.iter().filter(|a| a.correct).count(),
            round_total: recent.len(),
            wrong: recent
                .iter()
                .filter(|a| !a.correct)
                .map(|a| WrongAnswer {
                    prompt: a.prompt.clone(),
                    solution: a.solution.clone(),
                    response: a.response.clone(),
                })
                .collect(),
            score: self.score(),
            cumulative_total: self.cumulative_total(),
            progress_warning: None,
        }
    }
}


fn invalid(operation: &'static str, phase: Phase) -> QuizError {
    QuizError::InvalidTransition { operation, phase: phase.describe() }
}
