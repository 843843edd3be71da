use thiserror::Error;

/// A single multiple-choice question.
///
/// Options keep their authored order here; shuffling for display happens in
/// the quiz runner. Exactly one option, the one at `correct`, is the
/// right answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct: usize,
}

impl Question {
    /// Minimum number of answer options a question must offer.
    pub const MIN_OPTIONS: usize = 2;

    /// Create a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is empty after trimming.
    /// Returns `QuestionError::TooFewOptions` if fewer than two options are given.
    /// Returns `QuestionError::EmptyOption` if any option is empty after trimming.
    /// Returns `QuestionError::CorrectOutOfRange` if `correct` does not index an option.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct: usize,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < Self::MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                count: options.len(),
            });
        }
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }
        if correct >= options.len() {
            return Err(QuestionError::CorrectOutOfRange {
                index: correct,
                count: options.len(),
            });
        }
        Ok(Self {
            prompt,
            options,
            correct,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the correct option in authored order.
    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least two options, got {count}")]
    TooFewOptions { count: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("correct option index {index} out of range for {count} options")]
    CorrectOutOfRange { index: usize, count: usize },
}

// ─── TESTS ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn valid_question_constructs() {
        let q = Question::new(
            "What does LLM stand for?",
            options(&["Large Language Model", "Long Learning Machine"]),
            0,
        )
        .unwrap();
        assert_eq!(q.prompt(), "What does LLM stand for?");
        assert_eq!(q.options().len(), 2);
        assert_eq!(q.correct(), 0);
    }

    #[test]
    fn empty_prompt_rejected() {
        let err = Question::new("   ", options(&["a", "b"]), 0).unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn single_option_rejected() {
        let err = Question::new("p", options(&["only"]), 0).unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { count: 1 });
    }

    #[test]
    fn blank_option_rejected() {
        let err = Question::new("p", options(&["a", " ", "c"]), 0).unwrap_err();
        assert_eq!(err, QuestionError::EmptyOption { index: 1 });
    }

    #[test]
    fn correct_index_must_be_in_range() {
        let err = Question::new("p", options(&["a", "b"]), 2).unwrap_err();
        assert_eq!(
            err,
            QuestionError::CorrectOutOfRange { index: 2, count: 2 }
        );
    }
}
