use thiserror::Error;

use crate::model::Question;
use crate::model::ids::SectionId;

/// One titled unit of course content with an associated quiz.
///
/// The body is markdown, rendered by the UI. A section whose quiz is empty
/// renders no quiz panel and can therefore never be completed; sections
/// after it stay locked. That mirrors how the source material degrades when
/// question data is missing, and is deliberate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    id: SectionId,
    title: String,
    body: String,
    questions: Vec<Question>,
}

impl Section {
    /// Create a validated section.
    ///
    /// # Errors
    ///
    /// Returns `SectionError::EmptyTitle` if the title is empty after trimming.
    pub fn new(
        id: SectionId,
        title: impl Into<String>,
        body: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, SectionError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(SectionError::EmptyTitle);
        }
        Ok(Self {
            id,
            title,
            body: body.into(),
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Markdown body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn has_quiz(&self) -> bool {
        !self.questions.is_empty()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SectionError {
    #[error("section title cannot be empty")]
    EmptyTitle,
}

// ─── TESTS ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question::new("2 + 2?", vec!["4".into(), "5".into()], 0).unwrap()
    }

    #[test]
    fn section_with_quiz() {
        let section = Section::new(
            SectionId::new("intro").unwrap(),
            "Introduction",
            "# Welcome\n\nSome text.",
            vec![sample_question()],
        )
        .unwrap();

        assert_eq!(section.title(), "Introduction");
        assert!(section.has_quiz());
    }

    #[test]
    fn section_without_quiz_is_allowed() {
        let section = Section::new(
            SectionId::new("appendix").unwrap(),
            "Appendix",
            "",
            Vec::new(),
        )
        .unwrap();

        assert!(!section.has_quiz());
    }

    #[test]
    fn empty_title_rejected() {
        let err = Section::new(SectionId::new("x").unwrap(), "  ", "", Vec::new()).unwrap_err();
        assert_eq!(err, SectionError::EmptyTitle);
    }
}
