use course_core::model::Question;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::QuizError;

/// One display option of the current question, in shuffled order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledOption {
    pub text: String,
    pub correct: bool,
}

/// Where the current question stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for the learner to pick an option.
    Answering,
    /// An option was picked; the UI shows the outcome for a fixed delay
    /// before calling [`QuizRun::advance`].
    Revealed { selected: usize, correct: bool },
}

/// What happened when a revealed question was advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAdvance {
    /// More questions remain; the run moved to the next one.
    NextQuestion,
    /// Every question was answered correctly. Reported exactly once.
    Passed,
    /// The run ended with at least one miss and reset to question zero.
    /// `score` is what the learner had before the reset.
    Restarted { score: usize },
}

/// One attempt at a section's quiz.
///
/// The question list is fixed for the lifetime of the run; only the
/// option order within the current question is shuffled, freshly on
/// every (re-)entry. A run passes only on a perfect score; any miss
/// surfaces as a [`QuizAdvance::Restarted`] once the final reveal is
/// advanced, sending the learner back to question zero.
///
/// The runner holds no handles and persists nothing; whoever observes
/// [`QuizAdvance::Passed`] records the completion.
#[derive(Debug, Clone)]
pub struct QuizRun {
    questions: Vec<Question>,
    index: usize,
    score: usize,
    attempt: u32,
    options: Vec<ShuffledOption>,
    phase: QuizPhase,
    passed: bool,
}

impl QuizRun {
    /// Start a run over the given questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` for an empty list.
    pub fn new(questions: Vec<Question>, rng: &mut impl Rng) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        let options = shuffled_options(&questions[0], rng);
        Ok(Self {
            questions,
            index: 0,
            score: 0,
            attempt: 1,
            options,
            phase: QuizPhase::Answering,
            passed: false,
        })
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.index]
    }

    /// Shuffled options of the current question.
    #[must_use]
    pub fn options(&self) -> &[ShuffledOption] {
        &self.options
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// 1-based attempt counter; bumped on every restart.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.passed
    }

    /// Pick an option for the current question and reveal the outcome.
    ///
    /// Returns whether the pick was correct.
    ///
    /// # Errors
    ///
    /// `Finished` after a pass, `AlreadyRevealed` when the question was
    /// already answered, `OptionOutOfRange` for a bad index.
    pub fn answer(&mut self, option_index: usize) -> Result<bool, QuizError> {
        if self.passed {
            return Err(QuizError::Finished);
        }
        if matches!(self.phase, QuizPhase::Revealed { .. }) {
            return Err(QuizError::AlreadyRevealed);
        }
        let count = self.options.len();
        let Some(option) = self.options.get(option_index) else {
            return Err(QuizError::OptionOutOfRange {
                index: option_index,
                count,
            });
        };

        let correct = option.correct;
        if correct {
            self.score += 1;
        }
        self.phase = QuizPhase::Revealed {
            selected: option_index,
            correct,
        };
        Ok(correct)
    }

    /// Leave the reveal: next question, pass, or restart.
    ///
    /// # Errors
    ///
    /// `Finished` after a pass, `NotRevealed` when the current question
    /// has not been answered yet.
    pub fn advance(&mut self, rng: &mut impl Rng) -> Result<QuizAdvance, QuizError> {
        if self.passed {
            return Err(QuizError::Finished);
        }
        if !matches!(self.phase, QuizPhase::Revealed { .. }) {
            return Err(QuizError::NotRevealed);
        }

        if self.index + 1 < self.questions.len() {
            self.index += 1;
            self.enter_current(rng);
            return Ok(QuizAdvance::NextQuestion);
        }

        if self.score == self.questions.len() {
            self.passed = true;
            return Ok(QuizAdvance::Passed);
        }

        let score = self.score;
        self.index = 0;
        self.score = 0;
        self.attempt += 1;
        self.enter_current(rng);
        Ok(QuizAdvance::Restarted { score })
    }

    fn enter_current(&mut self, rng: &mut impl Rng) {
        self.options = shuffled_options(&self.questions[self.index], rng);
        self.phase = QuizPhase::Answering;
    }
}

fn shuffled_options(question: &Question, rng: &mut impl Rng) -> Vec<ShuffledOption> {
    let mut options: Vec<ShuffledOption> = question
        .options()
        .iter()
        .enumerate()
        .map(|(index, text)| ShuffledOption {
            text: text.clone(),
            correct: index == question.correct(),
        })
        .collect();
    options.shuffle(rng);
    options
}
