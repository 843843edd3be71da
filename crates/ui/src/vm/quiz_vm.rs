use course_core::model::Question;
use services::{QuizAdvance, QuizError, QuizPhase, QuizRun, ShuffledOption};

/// How long a revealed answer stays on screen before the run advances.
pub const REVEAL_DELAY_MS: u64 = 1500;

/// How long the section-completed celebration banner stays up.
pub const CELEBRATION_MS: u64 = 4000;

/// Messages the quiz panel's dispatch handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    /// Submit the option at this display index.
    Select(usize),
    /// Apply the post-reveal transition. Normally fired by the reveal timer.
    Advance,
    /// Begin a fresh run over the same questions.
    Restart,
}

/// What the quiz panel does once a reveal delay elapses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    Passed,
    Restarted { score: usize, total: usize },
}

/// Visual state of one option button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionStyle {
    Neutral,
    Correct,
    Incorrect,
    Dimmed,
}

impl OptionStyle {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionStyle::Neutral => "quiz-option",
            OptionStyle::Correct => "quiz-option quiz-option--correct",
            OptionStyle::Incorrect => "quiz-option quiz-option--incorrect",
            OptionStyle::Dimmed => "quiz-option quiz-option--dimmed",
        }
    }
}

/// Styling for option `index` given the run's phase.
///
/// While answering every option is neutral. After a reveal the correct
/// option is highlighted, the learner's wrong pick (if any) is marked, and
/// the rest recede.
#[must_use]
pub fn option_style(phase: QuizPhase, option: &ShuffledOption, index: usize) -> OptionStyle {
    match phase {
        QuizPhase::Answering => OptionStyle::Neutral,
        QuizPhase::Revealed { selected, .. } => {
            if option.correct {
                OptionStyle::Correct
            } else if index == selected {
                OptionStyle::Incorrect
            } else {
                OptionStyle::Dimmed
            }
        }
    }
}

/// UI-facing wrapper around a [`QuizRun`], supplying the entropy source.
pub struct QuizVm {
    run: QuizRun,
}

impl QuizVm {
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` for an empty question list.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        let mut rng = rand::rng();
        Ok(Self {
            run: QuizRun::new(questions, &mut rng)?,
        })
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.run.phase()
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        self.run.current_question().prompt()
    }

    #[must_use]
    pub fn options(&self) -> &[ShuffledOption] {
        self.run.options()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.run.current_index()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.run.total()
    }

    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.run.is_passed()
    }

    /// Submit the option at `index` and reveal the result.
    ///
    /// # Errors
    ///
    /// Propagates the run's errors (already revealed, out of range, run
    /// already passed).
    pub fn select(&mut self, index: usize) -> Result<bool, QuizError> {
        self.run.answer(index)
    }

    /// Leave the revealed state, re-shuffling wherever the run re-enters a
    /// question.
    ///
    /// # Errors
    ///
    /// Propagates the run's errors (nothing revealed, run already passed).
    pub fn advance(&mut self) -> Result<QuizOutcome, QuizError> {
        let mut rng = rand::rng();
        let total = self.run.total();
        Ok(match self.run.advance(&mut rng)? {
            QuizAdvance::NextQuestion => QuizOutcome::Continue,
            QuizAdvance::Passed => QuizOutcome::Passed,
            QuizAdvance::Restarted { score } => QuizOutcome::Restarted { score, total },
        })
    }
}
